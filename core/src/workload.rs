/// Read-only input shared by every variant of one scenario.
///
/// Built once before any timing starts and dropped when the scenario ends.
/// Variants only ever see `&Self`.
pub trait Workload {
    /// One-line description shown in report headers, e.g. `10000 integers, target 9999`.
    fn summary(&self) -> String;
}

impl<T> Workload for Vec<T> {
    fn summary(&self) -> String {
        format!("{} items", self.len())
    }
}
