use crate::error::ChartError;
use crate::figure::{ChartFigure, ChartKind};
use crate::render::render_png;
use std::io::ErrorKind;
use std::path::Path;
use tempfile::TempPath;

/// One rendered chart on disk.
#[derive(Debug)]
pub struct ChartArtifact {
    pub kind: ChartKind,
    pub title: String,
    path: TempPath,
}

impl ChartArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The temporary PNG files rendered for one report.
///
/// Files are deleted by `cleanup()` or, failing that, when the value is
/// dropped. A file that is already gone is not an error.
#[derive(Debug, Default)]
pub struct ChartArtifacts {
    items: Vec<ChartArtifact>,
}

fn render_one(figure: &ChartFigure, size: (u32, u32)) -> Result<ChartArtifact, ChartError> {
    let path = tempfile::Builder::new()
        .prefix("tradetrack-chart-")
        .suffix(".png")
        .tempfile()?
        .into_temp_path();
    // On error `path` is dropped here and the partial file removed.
    render_png(figure, &path, size)?;
    Ok(ChartArtifact {
        kind: figure.kind,
        title: figure.title.clone(),
        path,
    })
}

impl ChartArtifacts {
    /// Renders every figure to its own temporary PNG. A figure that fails to
    /// render is logged and left out; the rest still render.
    pub fn render(figures: &[ChartFigure], size: (u32, u32)) -> Self {
        let mut items = Vec::with_capacity(figures.len());
        for figure in figures {
            match render_one(figure, size) {
                Ok(artifact) => items.push(artifact),
                Err(e) => tracing::warn!(error = ?e, kind = ?figure.kind, "Skipping chart"),
            }
        }
        tracing::debug!(rendered = items.len(), requested = figures.len(), "Rendered chart artifacts");
        Self { items }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartArtifact> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Deletes every file now. Returns how many were actually removed.
    pub fn cleanup(self) -> usize {
        let mut removed = 0;
        for artifact in self.items {
            let shown = artifact.path.display().to_string();
            match artifact.path.close() {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(error = ?e, path = %shown, "Failed to remove chart image"),
            }
        }
        removed
    }
}
