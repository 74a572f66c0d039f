//! Type definitions for applicants and quotes

pub mod applicant;
pub mod quote;

pub use applicant::{Applicant, YesNo};
pub use quote::CostQuote;
