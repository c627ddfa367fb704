//! Capability handlers
//!
//! - `calculator` - two-operand arithmetic
//! - `translator` - English to German phrase table
//! - `knowledge` - open-domain questions via a language model or offline answers

pub mod calculator;
pub mod knowledge;
pub mod translator;

pub use calculator::{ArithmeticRequest, Calculation, Calculator, CalculatorError, Operator};
pub use knowledge::{KnowledgeAnswerer, OfflineAnswers};
pub use translator::{Confidence, Translation, TranslationError, TranslationRequest, Translator};
