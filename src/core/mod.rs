//! Core library components.
//!
//! This module contains the federation logic: validation, token sources,
//! STS exchanges, credential publication and the smoke-test probe.

pub mod config;
pub mod constants;
pub mod domain;
pub mod federation;
pub mod probe;
pub mod publish;
pub mod resolver;
pub mod sts;
pub mod token;
pub mod validation;
pub mod workflow;
