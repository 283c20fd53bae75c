use async_trait::async_trait;

use crate::common::errors::Result;
use crate::common::types::ParlayEvaluation;

/// Produces free-text commentary for a finished evaluation
///
/// Commentary is purely additive: implementations read the evaluation and
/// never feed anything back into the numbers.
///
/// # Example
///
/// ```ignore
/// struct OneLiner;
///
/// #[async_trait]
/// impl Commentator for OneLiner {
///     fn name(&self) -> &'static str { "one_liner" }
///
///     async fn produce_commentary(&self, evaluation: &ParlayEvaluation) -> Result<String> {
///         Ok(format!("Verdict: {}", evaluation.verdict))
///     }
/// }
/// ```
#[async_trait]
pub trait Commentator: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// Write commentary for the evaluation
    async fn produce_commentary(&self, evaluation: &ParlayEvaluation) -> Result<String>;
}

/// Boxed commentator for dynamic dispatch
pub type BoxedCommentator = Box<dyn Commentator>;
