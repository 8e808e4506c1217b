#![doc(test(attr(deny(warnings))))]

//! Gerencie tracks personal and business finances: transactions, budget
//! categories, debts, savings goals, a shopping list and vehicle maintenance.
//! Records live in a local store or a hosted table store behind one adapter,
//! and a language-model assistant turns sentences, receipts and voice notes
//! into transactions.

pub mod agent;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Gerencie tracing initialized.");
    });
}
