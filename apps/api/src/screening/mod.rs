// Screening Workflow: file -> text -> scoring call -> candidate record.
// Text extraction and scoring are capability traits so the concrete PDF
// library and model provider can be swapped without touching the workflow.

pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod scorer;
pub mod workflow;

#[cfg(test)]
pub mod testing;

pub use extractor::{ExtractionError, PdfTextExtractor};
pub use scorer::{LlmScorer, ScoringError};
pub use workflow::{ScreeningError, ScreeningWorkflow, WorkflowTimeouts};
