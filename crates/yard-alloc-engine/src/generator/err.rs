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

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioOutOfRangeError {
    name: &'static str,
    value: f64,
}

impl RatioOutOfRangeError {
    pub fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Display for RatioOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RatioOutOfRangeError: {} must lie in [0, 1], got {}",
            self.name, self.value
        )
    }
}

impl std::error::Error for RatioOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YardGenConfigBuildError {
    RatioOutOfRange(RatioOutOfRangeError),
    ZeroAttempts,
}

impl Display for YardGenConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use YardGenConfigBuildError::*;
        match self {
            RatioOutOfRange(e) => write!(f, "{}", e),
            ZeroAttempts => write!(f, "max_attempts must be at least 1"),
        }
    }
}

impl From<RatioOutOfRangeError> for YardGenConfigBuildError {
    fn from(err: RatioOutOfRangeError) -> Self {
        Self::RatioOutOfRange(err)
    }
}

impl std::error::Error for YardGenConfigBuildError {}
