// Copyright (c) 2026 MediSched Contributors
//
// This file is part of MediSched.
//
// Licensed under the MIT License. See the LICENSE file in the repository
// root for full license text.
//
// This software is provided "AS IS", without warranty of any kind.

pub mod client;
pub mod errors;
pub mod store;

pub use client::HomeAssistantClient;
pub use errors::{HaError, HaResult};
pub use store::HaScheduleStore;
