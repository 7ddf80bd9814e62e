// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    config::EngineConfig,
    err::EngineError,
    placement::PlacementValidator,
    relocation::RelocationValidator,
    result::{PlacementResult, RelocationResult},
    suggest::{SuggestionEngine, SuggestionQuery},
};
use std::sync::Arc;
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// One yard's engine: a catalog and the knobs the validators share.
///
/// Occupancy is passed per call, so a single engine serves any number of
/// concurrent requests against different snapshots of the same site.
#[derive(Debug, Clone)]
pub struct YardEngine {
    catalog: Arc<SlotCatalog>,
    config: EngineConfig,
}

impl YardEngine {
    #[inline]
    pub fn new(catalog: Arc<SlotCatalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Engine over whatever catalog `shared` currently holds. Later reloads
    /// are not seen by the returned engine.
    #[inline]
    pub fn from_shared(shared: &SharedCatalog, config: EngineConfig) -> Self {
        Self::new(shared.current(), config)
    }

    #[inline]
    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn placement(&self) -> PlacementValidator<'_> {
        PlacementValidator::new(&self.catalog, &self.config)
    }

    #[inline]
    pub fn relocation(&self) -> RelocationValidator<'_> {
        RelocationValidator::new(&self.catalog, &self.config)
    }

    #[inline]
    pub fn suggestions(&self) -> SuggestionEngine<'_> {
        SuggestionEngine::new(&self.catalog)
    }

    #[inline]
    pub fn validate_placement<O: OccupancyRead>(
        &self,
        slot: SlotCoord,
        length: LengthClass,
        state: ContainerState,
        occupancy: &O,
    ) -> Result<PlacementResult, EngineError> {
        self.placement()
            .validate_placement(slot, length, state, occupancy)
    }

    #[inline]
    pub fn validate_relocation<O: OccupancyRead>(
        &self,
        source: SlotCoord,
        destination: SlotCoord,
        state: ContainerState,
        length: LengthClass,
        occupancy: &O,
    ) -> Result<RelocationResult, EngineError> {
        self.relocation()
            .validate_relocation(source, destination, state, length, occupancy)
    }

    #[inline]
    pub fn suggest<O: OccupancyRead>(
        &self,
        occupancy: &O,
        query: &SuggestionQuery,
    ) -> Result<Vec<SlotCoord>, EngineError> {
        self.suggestions().suggest(occupancy, query)
    }

    /// [`validate_placement`](Self::validate_placement) for a slot given as text, e.g. `"A02-1"`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Coordinate`] if `slot` is not a well-formed coordinate.
    pub fn validate_placement_text<O: OccupancyRead>(
        &self,
        slot: &str,
        length: LengthClass,
        state: ContainerState,
        occupancy: &O,
    ) -> Result<PlacementResult, EngineError> {
        let slot = SlotCoord::parse(slot)?;
        self.validate_placement(slot, length, state, occupancy)
    }

    /// [`validate_relocation`](Self::validate_relocation) for slots given as text.
    ///
    /// # Errors
    ///
    /// [`EngineError::Coordinate`] if either slot is not a well-formed coordinate.
    pub fn validate_relocation_text<O: OccupancyRead>(
        &self,
        source: &str,
        destination: &str,
        state: ContainerState,
        length: LengthClass,
        occupancy: &O,
    ) -> Result<RelocationResult, EngineError> {
        let source = SlotCoord::parse(source)?;
        let destination = SlotCoord::parse(destination)?;
        self.validate_relocation(source, destination, state, length, occupancy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{result::RejectionCode, testing::*};

    fn engine() -> YardEngine {
        YardEngine::new(Arc::new(uniform_catalog()), EngineConfig::default())
    }

    #[test]
    fn test_text_wrappers_parse_strictly() {
        let engine = engine();
        let occupancy = empty_yard();
        for text in ["A2-1", "a02-1", "F02-1", "A21-1", "A02-6", "A02-1 "] {
            let err = engine
                .validate_placement_text(text, LengthClass::Twenty, ContainerState::Full, &occupancy)
                .unwrap_err();
            assert_eq!(err.code(), Some(RejectionCode::MalformedCoordinate), "{}", text);
        }

        let result = engine
            .validate_placement_text("A02-1", LengthClass::Forty, ContainerState::Full, &occupancy)
            .unwrap();
        assert!(result.is_admitted());
    }

    #[test]
    fn test_relocation_text_wrapper() {
        let engine = engine();
        let occupancy = yard(&[("A01-1", "T1", LengthClass::Twenty)]);
        let result = engine
            .validate_relocation_text(
                "A01-1",
                "B01-1",
                ContainerState::Empty,
                LengthClass::Twenty,
                &occupancy,
            )
            .unwrap();
        assert!(result.is_admitted());

        assert!(matches!(
            engine.validate_relocation_text(
                "A01-1",
                "B1-1",
                ContainerState::Empty,
                LengthClass::Twenty,
                &occupancy,
            ),
            Err(EngineError::Coordinate(_))
        ));
    }

    #[test]
    fn test_engine_keeps_its_catalog_across_reloads() {
        let shared = SharedCatalog::new(catalog_of(&[("A01-1", "EMPTY_ONLY")]));
        let engine = YardEngine::from_shared(&shared, EngineConfig::default());
        shared.reload(uniform_catalog());

        let before = engine
            .validate_placement(c("A01-1"), LengthClass::Twenty, ContainerState::Full, &empty_yard())
            .unwrap();
        assert_eq!(before.code(), Some(RejectionCode::StateNotAccepted));

        let after = YardEngine::from_shared(&shared, EngineConfig::default())
            .validate_placement(c("A01-1"), LengthClass::Twenty, ContainerState::Full, &empty_yard())
            .unwrap();
        assert!(after.is_admitted());
    }

    #[test]
    fn test_suggestion_limit_follows_config() {
        let config = EngineConfig {
            rejection_suggestion_limit: 2,
            ..EngineConfig::default()
        };
        let engine = YardEngine::new(Arc::new(uniform_catalog()), config);
        let result = engine
            .validate_placement(
                c("A01-2"),
                LengthClass::Twenty,
                ContainerState::Full,
                &empty_yard(),
            )
            .unwrap();
        assert_eq!(result.rejection().unwrap().suggestions(), &[c("A01-1"), c("A02-1")]);
    }
}
