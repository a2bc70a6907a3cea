//! Scoped BEGIN/COMPLETE/FAILED logging for long-running steps

use std::time::Instant;

use super::logger::Logger;

/// Logs `{name}_BEGIN` on creation and exactly one of `{name}_COMPLETE`,
/// `{name}_FAILED` or `{name}_INCOMPLETE` afterwards
///
/// ```ignore
/// let scope = ObservationScope::new("SEED");
/// let summary = store.seed_from_csv(path).await?;
/// scope.complete_with_fields(&[("inserted", &summary.inserted.to_string())]);
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    started: Instant,
    finished: bool,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Fields given here are repeated on the closing event
    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            started: Instant::now(),
            finished: false,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        }
    }

    fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(mut self, extra_fields: &[(&str, &str)]) {
        self.finished = true;
        let elapsed = self.elapsed_ms();

        let mut all_fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("duration_ms", elapsed.as_str()));

        Logger::info(&format!("{}_COMPLETE", self.name), &all_fields);
    }

    pub fn fail(mut self, reason: &str) {
        self.finished = true;
        let elapsed = self.elapsed_ms();

        let mut all_fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_fields.push(("reason", reason));
        all_fields.push(("duration_ms", elapsed.as_str()));

        Logger::error(&format!("{}_FAILED", self.name), &all_fields);
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.finished {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}
