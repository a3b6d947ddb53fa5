//! Todo keyword highlighting
//!
//! The decorator owns the scan state: a compiled [`DecorationScanner`], a
//! [`Debouncer`] and the last set of [`PriorityBuckets`]. Hosts trigger it on
//! document or configuration changes, poll it from their event loop and get
//! every bucket re-rendered through a [`DecorationRenderer`] after each scan.

mod debounce;
mod scanner;

pub use debounce::Debouncer;
pub use scanner::DecorationScanner;

use crate::document::Range;
use crate::error::Result;
use crate::outline::{OutlineConfig, TodoPriority};
use log::debug;
use std::time::{Duration, Instant};

// ─────────────────────────────────────────────────────────────────────────────
// Buckets
// ─────────────────────────────────────────────────────────────────────────────

fn bucket_index(priority: TodoPriority) -> usize {
    match priority {
        TodoPriority::High => 0,
        TodoPriority::Medium => 1,
        TodoPriority::Normal => 2,
        TodoPriority::Low => 3,
    }
}

/// Keyword ranges grouped by priority, each in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityBuckets {
    buckets: [Vec<Range>; 4],
}

impl PriorityBuckets {
    pub fn push(&mut self, priority: TodoPriority, range: Range) {
        self.buckets[bucket_index(priority)].push(range);
    }

    pub fn get(&self, priority: TodoPriority) -> &[Range] {
        &self.buckets[bucket_index(priority)]
    }

    /// All buckets, including empty ones, in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (TodoPriority, &[Range])> + '_ {
        TodoPriority::all()
            .iter()
            .map(move |&priority| (priority, self.get(priority)))
    }

    /// Total number of ranges.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer Seam
// ─────────────────────────────────────────────────────────────────────────────

/// Receives decoration sets. Each call replaces whatever was previously
/// rendered for that priority.
pub trait DecorationRenderer {
    fn render(&mut self, priority: TodoPriority, ranges: &[Range]);
}

/// Renderer that keeps the last rendered set per priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSnapshot {
    rendered: PriorityBuckets,
    renders: usize,
}

impl DecorationSnapshot {
    pub fn rendered(&self) -> &PriorityBuckets {
        &self.rendered
    }

    /// Number of `render` calls received.
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl DecorationRenderer for DecorationSnapshot {
    fn render(&mut self, priority: TodoPriority, ranges: &[Range]) {
        self.rendered.buckets[bucket_index(priority)] = ranges.to_vec();
        self.renders += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decorator
// ─────────────────────────────────────────────────────────────────────────────

/// Debounced keyword highlighter.
#[derive(Debug)]
pub struct TodoDecorator<R: DecorationRenderer> {
    scanner: DecorationScanner,
    debouncer: Debouncer,
    buckets: PriorityBuckets,
    renderer: R,
}

impl<R: DecorationRenderer> TodoDecorator<R> {
    pub fn new(config: &OutlineConfig, delay: Duration, renderer: R) -> Result<Self> {
        Ok(Self {
            scanner: DecorationScanner::new(config.keywords())?,
            debouncer: Debouncer::new(delay),
            buckets: PriorityBuckets::default(),
            renderer,
        })
    }

    /// Rebuild the keyword pattern from a new configuration.
    pub fn reconfigure(&mut self, config: &OutlineConfig, delay: Duration) -> Result<()> {
        if config.keywords() != self.scanner.keywords() {
            debug!("Rebuilding keyword scanner ({} keywords)", config.keywords().len());
            self.scanner = DecorationScanner::new(config.keywords())?;
        }
        self.debouncer.set_delay(delay);
        Ok(())
    }

    /// Schedule a rescan, replacing any pending one.
    pub fn trigger(&mut self, now: Instant) {
        self.debouncer.schedule(now);
    }

    /// Whether a scheduled scan is due. Clears the pending slot when it is.
    pub fn take_due(&mut self, now: Instant) -> bool {
        self.debouncer.take_due(now)
    }

    /// Rescan `text` if a scheduled scan is due. Returns whether it ran.
    pub fn poll(&mut self, now: Instant, text: &str) -> bool {
        if !self.take_due(now) {
            return false;
        }
        self.refresh(text);
        true
    }

    /// Scan immediately and re-render every bucket.
    pub fn refresh(&mut self, text: &str) {
        self.buckets = self.scanner.scan(text);
        for (priority, ranges) in self.buckets.iter() {
            self.renderer.render(priority, ranges);
        }
    }

    pub fn buckets(&self) -> &PriorityBuckets {
        &self.buckets
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    const MS: Duration = Duration::from_millis(1);

    fn decorator(keywords: &[&str]) -> TodoDecorator<DecorationSnapshot> {
        let settings = Settings {
            todo_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..Settings::default()
        };
        let config = OutlineConfig::from_settings(&settings).unwrap();
        TodoDecorator::new(&config, 200 * MS, DecorationSnapshot::default()).unwrap()
    }

    #[test]
    fn test_buckets() {
        let mut buckets = PriorityBuckets::default();
        assert!(buckets.is_empty());

        buckets.push(TodoPriority::Low, Range::on_line(3, 2, 6));
        buckets.push(TodoPriority::Low, Range::on_line(5, 2, 6));
        buckets.push(TodoPriority::High, Range::on_line(1, 2, 6));

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets.get(TodoPriority::Low).len(), 2);
        let order: Vec<TodoPriority> = buckets.iter().map(|(p, _)| p).collect();
        assert_eq!(order, TodoPriority::all());
    }

    #[test]
    fn test_refresh_renders_all_buckets() {
        let mut decorator = decorator(&["TODO.high", "DONE"]);
        decorator.refresh("# TODO a\n# DONE b");

        let snapshot = decorator.renderer();
        assert_eq!(snapshot.render_count(), 4);
        assert_eq!(
            snapshot.rendered().get(TodoPriority::High),
            &[Range::on_line(0, 2, 6)]
        );
        assert_eq!(
            snapshot.rendered().get(TodoPriority::Normal),
            &[Range::on_line(1, 2, 6)]
        );
    }

    #[test]
    fn test_rescan_replaces_previous_decorations() {
        let mut decorator = decorator(&["TODO"]);
        decorator.refresh("# TODO a\n# TODO b");
        decorator.refresh("# done");

        assert!(decorator.buckets().is_empty());
        assert!(decorator.renderer().rendered().is_empty());
        assert_eq!(decorator.renderer().render_count(), 8);
    }

    #[test]
    fn test_poll_is_debounced() {
        let start = Instant::now();
        let mut decorator = decorator(&["TODO"]);

        decorator.trigger(start);
        decorator.trigger(start + 150 * MS);
        assert!(!decorator.poll(start + 300 * MS, "# TODO"));
        assert!(decorator.poll(start + 350 * MS, "# TODO"));
        assert_eq!(decorator.buckets().len(), 1);
        assert!(!decorator.poll(start + 900 * MS, "# TODO"));
        assert_eq!(decorator.renderer().render_count(), 4);
    }

    #[test]
    fn test_reconfigure_changes_keywords() {
        let mut decorator = decorator(&["TODO"]);
        let settings = Settings {
            todo_keywords: vec!["NEXT.medium".into()],
            ..Settings::default()
        };
        let config = OutlineConfig::from_settings(&settings).unwrap();
        decorator.reconfigure(&config, Duration::ZERO).unwrap();

        decorator.refresh("# TODO a\n# NEXT b");
        assert_eq!(
            decorator.buckets().get(TodoPriority::Medium),
            &[Range::on_line(1, 2, 6)]
        );
        assert!(decorator.buckets().get(TodoPriority::Normal).is_empty());
    }
}
