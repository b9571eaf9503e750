//! Terminal View
//!
//! Renders dashboard updates as timestamped lines. Only changes are printed,
//! so a steady feed at 500 ms stays quiet until something moves.

use base64::Engine;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::SignalTiming;
use crate::presenter::{
    Badge, DensityBar, GraphPanel, MetricsDisplay, Notice, NoticeKind, SignalButton,
    SignalDisplay, TimingDisplay,
};
use crate::view::DashboardView;

const BAR_WIDTH: usize = 20;

#[derive(Default)]
struct Rendered {
    badge: Option<Badge>,
    metrics: Option<MetricsDisplay>,
    density_line: Option<String>,
    signal: Option<SignalDisplay>,
    summary: Option<String>,
    source: Option<String>,
    preview: Option<bool>,
}

/// [`DashboardView`] that writes to a terminal (or any writer)
pub struct TerminalView {
    out: Mutex<Box<dyn Write + Send>>,
    rendered: Mutex<Rendered>,
    graph_output: Option<PathBuf>,
    show_summary: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TerminalView {
    /// Render to stdout
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            rendered: Mutex::new(Rendered::default()),
            graph_output: None,
            show_summary: true,
        }
    }

    /// Save loaded graphs as PNG to `path`
    pub fn graph_output(mut self, path: PathBuf) -> Self {
        self.graph_output = Some(path);
        self
    }

    /// Print the multi-line summary whenever it changes
    pub fn show_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    fn line(&self, text: &str) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        let mut out = lock(&self.out);
        if let Err(e) = writeln!(out, "[{}] {}", stamp, text).and_then(|_| out.flush()) {
            tracing::debug!("Terminal write failed: {}", e);
        }
    }

    fn save_graph(&self, graph: &str) {
        let bytes = match base64::engine::general_purpose::STANDARD.decode(graph.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.line(&format!("graph: undecodable image ({})", e));
                return;
            }
        };

        match &self.graph_output {
            Some(path) => match std::fs::write(path, &bytes) {
                Ok(()) => {
                    self.line(&format!(
                        "graph: saved {} bytes to {}",
                        bytes.len(),
                        path.display()
                    ));
                }
                Err(e) => {
                    tracing::error!("Failed to write graph to {:?}: {}", path, e);
                    self.line(&format!("graph: cannot write {}: {}", path.display(), e));
                }
            },
            None => self.line(&format!("graph: ready ({} bytes PNG)", bytes.len())),
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

fn bar_glyphs(percent: u8) -> String {
    let filled = (percent as usize * BAR_WIDTH + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

impl DashboardView for TerminalView {
    fn set_badge(&self, badge: Badge) {
        let changed = lock(&self.rendered).badge.replace(badge) != Some(badge);
        if changed {
            self.line(&format!("status: {}", badge.text()));
        }
    }

    fn set_metrics(&self, metrics: &MetricsDisplay) {
        lock(&self.rendered).metrics = Some(metrics.clone());
    }

    fn set_density_bar(&self, bar: DensityBar) {
        let text = {
            let rendered = lock(&self.rendered);
            let vehicles = rendered
                .metrics
                .as_ref()
                .map(|m| m.vehicle_count.as_str())
                .unwrap_or("0");
            format!(
                "density [{}] {:>3}% {:<6} {} vehicles",
                bar_glyphs(bar.percent),
                bar.percent,
                bar.level.as_str().to_uppercase(),
                vehicles
            )
        };

        let changed = lock(&self.rendered).density_line.replace(text.clone()) != Some(text.clone());
        if changed {
            self.line(&text);
        }
    }

    fn set_signal(&self, signal: SignalDisplay) {
        let changed = lock(&self.rendered).signal.replace(signal) != Some(signal);
        if changed {
            self.line(&format!("signal: {}", signal.status_text()));
        }
    }

    fn set_summary(&self, summary: &str) {
        if !self.show_summary || summary.trim().is_empty() {
            return;
        }
        let changed =
            lock(&self.rendered).summary.replace(summary.to_string()).as_deref() != Some(summary);
        if changed {
            for row in summary.lines().filter(|l| !l.trim().is_empty()) {
                self.line(&format!("  {}", row));
            }
        }
    }

    fn show_frame(&self, _frame: &str) {
        if lock(&self.rendered).preview.replace(true) != Some(true) {
            self.line("video: live preview");
        }
    }

    fn show_placeholder(&self) {
        if lock(&self.rendered).preview.replace(false) != Some(false) {
            self.line("video: no video");
        }
    }

    fn set_source_label(&self, label: &str) {
        let changed =
            lock(&self.rendered).source.replace(label.to_string()).as_deref() != Some(label);
        if changed {
            self.line(&format!("source: {}", label));
        }
    }

    fn show_notice(&self, notice: &Notice) {
        let tag = match notice.kind {
            NoticeKind::Info => "info",
            NoticeKind::Success => "ok",
            NoticeKind::Danger => "error",
        };
        self.line(&format!("[{}] {}", tag, notice.text));
    }

    fn hide_notice(&self) {
        tracing::trace!("Notice hidden");
    }

    fn show_signal_timing(&self, timing: &SignalTiming) {
        let display = TimingDisplay::from(timing);
        self.line(&format!(
            "timing: green {}s / red {}s - {}",
            display.green, display.red, display.note
        ));
    }

    fn set_signal_button(&self, button: SignalButton) {
        if button == SignalButton::Confirmed {
            self.line(button.text());
        }
    }

    fn open_graph_modal(&self) {
        self.line("graph: generating...");
    }

    fn set_graph(&self, panel: GraphPanel) {
        match panel {
            GraphPanel::Loading => {}
            GraphPanel::Image(graph) => self.save_graph(&graph),
            GraphPanel::Error(message) => self.line(&format!("graph: {}", message)),
        }
    }
}
