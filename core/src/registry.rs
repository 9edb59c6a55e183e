use std::any::Any;
use std::fmt;
use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};

use anyhow::anyhow;

use crate::error::{BenchError, Result};

type VariantFn<W> = Box<dyn Fn(&W) -> anyhow::Result<()>>;

/// One named candidate implementation of the operation under comparison.
///
/// The stored closure already discards the operation's output through
/// [`black_box`], so callers only see success or failure.
pub struct Variant<W> {
    name: String,
    op: VariantFn<W>,
}

impl<W> Variant<W> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the operation once. Panics inside the operation are caught and
    /// returned as errors.
    pub fn invoke(&self, workload: &W) -> anyhow::Result<()> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.op)(workload))) {
            Ok(result) => result,
            Err(payload) => Err(anyhow!("panicked: {}", panic_message(payload.as_ref()))),
        }
    }
}

impl<W> fmt::Debug for Variant<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Text of a caught panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Ordered set of variants sharing one workload type.
///
/// Registration order is significant: it is the order variants are timed
/// and reported in, and the first variant is the default baseline.
pub struct VariantRegistry<W> {
    variants: Vec<Variant<W>>,
    frozen: bool,
}

impl<W> VariantRegistry<W> {
    pub fn new() -> Self {
        Self {
            variants: Vec::new(),
            frozen: false,
        }
    }

    /// Register an infallible operation.
    pub fn register<R, F>(&mut self, name: impl Into<String>, op: F) -> Result<()>
    where
        W: 'static,
        F: Fn(&W) -> R + 'static,
    {
        self.insert(
            name.into(),
            Box::new(move |workload: &W| {
                black_box(op(workload));
                Ok(())
            }),
        )
    }

    /// Register an operation that can report failure through `Err`.
    pub fn register_fallible<R, F>(&mut self, name: impl Into<String>, op: F) -> Result<()>
    where
        W: 'static,
        F: Fn(&W) -> anyhow::Result<R> + 'static,
    {
        self.insert(
            name.into(),
            Box::new(move |workload: &W| {
                black_box(op(workload)?);
                Ok(())
            }),
        )
    }

    fn insert(&mut self, name: String, op: VariantFn<W>) -> Result<()> {
        if self.frozen {
            return Err(BenchError::configuration(format!(
                "cannot register '{}': registry is frozen once the scenario runs",
                name
            )));
        }
        if name.trim().is_empty() {
            return Err(BenchError::configuration("variant name must not be empty"));
        }
        if self.get(&name).is_some() {
            return Err(BenchError::configuration(format!("duplicate variant name '{}'", name)));
        }
        self.variants.push(Variant { name, op });
        Ok(())
    }

    /// Variants in registration order.
    pub fn list(&self) -> &[Variant<W>] {
        &self.variants
    }

    pub fn names(&self) -> Vec<&str> {
        self.variants.iter().map(Variant::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Variant<W>> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Reject any further registration.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Pick the baseline: the explicit name when given (it must be
    /// registered), otherwise the first registered variant.
    pub fn resolve_baseline(&self, explicit: Option<&str>) -> Result<String> {
        match explicit {
            Some(name) => self
                .get(name)
                .map(|v| v.name.clone())
                .ok_or_else(|| BenchError::configuration(format!("baseline '{}' is not a registered variant", name))),
            None => self
                .variants
                .first()
                .map(|v| v.name.clone())
                .ok_or_else(|| BenchError::configuration("no variants registered")),
        }
    }
}

impl<W> Default for VariantRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> fmt::Debug for VariantRegistry<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("variants", &self.names())
            .field("frozen", &self.frozen)
            .finish()
    }
}
