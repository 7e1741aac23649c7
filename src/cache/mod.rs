// ABOUTME: Process-scoped caches of derived values with explicit invalidation policies
// ABOUTME: Houses the day-scoped clothing prediction cache and its injectable clock
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Day-scoped clothing insulation cache
pub mod clothing;

pub use clothing::{ClothingEstimate, ClothingPredictionCache, Clock, SystemClock};
