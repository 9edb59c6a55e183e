//! Building one string out of many pieces.

use zenbench_core::{HarnessConfig, Result, Scenario, ScenarioMeta, VariantRegistry, Workload};

pub const TOKEN: &str = "x";
pub const COPIES: usize = 1000;
pub const SEPARATOR: &str = " ";

#[derive(Debug, Clone)]
pub struct StringWorkload {
    pub tokens: Vec<String>,
    pub separator: String,
}

impl StringWorkload {
    pub fn new(token: &str, copies: usize, separator: &str) -> Self {
        Self {
            tokens: vec![token.to_string(); copies],
            separator: separator.to_string(),
        }
    }

    /// Length every variant must produce.
    pub fn expected_len(&self) -> usize {
        let tokens: usize = self.tokens.iter().map(String::len).sum();
        tokens + self.separator.len() * self.tokens.len().saturating_sub(1)
    }
}

impl Workload for StringWorkload {
    fn summary(&self) -> String {
        let token = self.tokens.first().map(String::as_str).unwrap_or("");
        format!("{} copies of {:?} joined by {:?}", self.tokens.len(), token, self.separator)
    }
}

/// Rebuilds the whole string on every step.
pub fn incremental_concat(w: &StringWorkload) -> String {
    let mut out = String::new();
    for (i, token) in w.tokens.iter().enumerate() {
        out = if i == 0 {
            format!("{}{}", out, token)
        } else {
            format!("{}{}{}", out, w.separator, token)
        };
    }
    out
}

pub fn push_then_join(w: &StringWorkload) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for token in &w.tokens {
        parts.push(token);
    }
    parts.join(&w.separator)
}

pub fn batch_join(w: &StringWorkload) -> String {
    w.tokens.join(&w.separator)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringAssembly;

impl ScenarioMeta for StringAssembly {
    fn name(&self) -> &'static str {
        "string-assembly"
    }

    fn title(&self) -> &'static str {
        "String assembly: repeated concatenation vs join"
    }
}

impl Scenario for StringAssembly {
    type Workload = StringWorkload;

    fn default_repetitions(&self) -> Option<u32> {
        Some(100)
    }

    fn build(&self, _config: &HarnessConfig) -> Result<StringWorkload> {
        Ok(StringWorkload::new(TOKEN, COPIES, SEPARATOR))
    }

    fn register(&self, registry: &mut VariantRegistry<StringWorkload>) -> Result<()> {
        registry.register("incremental-concat", incremental_concat)?;
        registry.register("push-then-join", push_then_join)?;
        registry.register("batch-join", batch_join)?;
        Ok(())
    }
}
