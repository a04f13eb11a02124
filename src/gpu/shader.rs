//! Shader loading and compilation.
//!
//! A [`ShaderBuilder`] collects one WGSL source per pipeline stage, either
//! embedded in the binary or read from disk, and compiles them inside a
//! validation error scope so compile failures come back as errors instead of
//! device panics.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::error::ViewerError;

/// Default model shader (Blinn-Phong with a directional light).
pub const MODEL_WGSL: &str = include_str!("../../assets/shaders/model.wgsl");
/// Default line shader for wireframe edges and overlays.
pub const LINE_WGSL: &str = include_str!("../../assets/shaders/line.wgsl");

/// Pipeline stage a source is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage, entry point `vs_main`.
    Vertex,
    /// Fragment stage, entry point `fs_main`.
    Fragment,
}

impl ShaderStage {
    /// WGSL entry point name for this stage.
    #[must_use]
    pub fn entry_point(self) -> &'static str {
        match self {
            Self::Vertex => "vs_main",
            Self::Fragment => "fs_main",
        }
    }
}

/// Where a stage's WGSL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// Source compiled into the binary.
    Embedded {
        /// Name used in labels and error messages.
        name: &'static str,
        /// WGSL text.
        wgsl: &'static str,
    },
    /// Source read from disk at build time.
    File(PathBuf),
}

impl ShaderSource {
    /// The embedded model shader.
    #[must_use]
    pub fn model() -> Self {
        Self::Embedded {
            name: "model.wgsl",
            wgsl: MODEL_WGSL,
        }
    }

    /// The embedded line shader.
    #[must_use]
    pub fn line() -> Self {
        Self::Embedded {
            name: "line.wgsl",
            wgsl: LINE_WGSL,
        }
    }

    /// Human-readable name of the source.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Embedded { name, .. } => Cow::Borrowed(name),
            Self::File(path) => path.to_string_lossy(),
        }
    }

    /// Read the WGSL text.
    ///
    /// # Errors
    ///
    /// [`ViewerError::Shader`] if a file source cannot be read.
    pub fn load(&self) -> Result<Cow<'static, str>, ViewerError> {
        match self {
            Self::Embedded { wgsl, .. } => Ok(Cow::Borrowed(wgsl)),
            Self::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|e| ViewerError::Shader(format!("{}: {e}", path.display()))),
        }
    }
}

/// Compiled vertex and fragment modules ready for pipeline creation.
pub struct ShaderProgram {
    /// Module holding `vs_main`.
    pub vertex: wgpu::ShaderModule,
    /// Module holding `fs_main`.
    pub fragment: wgpu::ShaderModule,
}

/// Collects `(stage, source)` pairs and compiles them into a
/// [`ShaderProgram`].
#[derive(Debug, Clone)]
pub struct ShaderBuilder {
    label: String,
    vertex: Option<ShaderSource>,
    fragment: Option<ShaderSource>,
}

impl ShaderBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            vertex: None,
            fragment: None,
        }
    }

    /// Use one source for both stages.
    #[must_use]
    pub fn with_source(label: impl Into<String>, source: ShaderSource) -> Self {
        let mut builder = Self::new(label);
        let _ = builder
            .set_shader(ShaderStage::Vertex, source.clone())
            .set_shader(ShaderStage::Fragment, source);
        builder
    }

    /// Assign the source for a stage, replacing any earlier one.
    pub fn set_shader(&mut self, stage: ShaderStage, source: ShaderSource) -> &mut Self {
        match stage {
            ShaderStage::Vertex => self.vertex = Some(source),
            ShaderStage::Fragment => self.fragment = Some(source),
        }
        self
    }

    /// Source assigned to `stage`, if any.
    #[must_use]
    pub fn source(&self, stage: ShaderStage) -> Option<&ShaderSource> {
        match stage {
            ShaderStage::Vertex => self.vertex.as_ref(),
            ShaderStage::Fragment => self.fragment.as_ref(),
        }
    }

    /// Load and compile both stages.
    ///
    /// # Errors
    ///
    /// [`ViewerError::Shader`] when a stage is missing, unreadable, or fails
    /// validation.
    pub fn build(&self, device: &wgpu::Device) -> Result<ShaderProgram, ViewerError> {
        let vertex = self.compile(device, ShaderStage::Vertex)?;
        let fragment = if self.vertex == self.fragment {
            vertex.clone()
        } else {
            self.compile(device, ShaderStage::Fragment)?
        };
        Ok(ShaderProgram { vertex, fragment })
    }

    fn compile(
        &self,
        device: &wgpu::Device,
        stage: ShaderStage,
    ) -> Result<wgpu::ShaderModule, ViewerError> {
        let source = self.source(stage).ok_or_else(|| {
            ViewerError::Shader(format!("{}: no {stage:?} shader set", self.label))
        })?;
        let wgsl = source.load()?;
        let label = format!("{} {:?} ({})", self.label, stage, source.name());

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(wgsl),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ViewerError::Shader(format!("{label}: {err}")));
        }
        log::debug!("compiled {label}");
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(name: &str, wgsl: &str) {
        let module = naga::front::wgsl::parse_str(wgsl)
            .unwrap_or_else(|e| panic!("{name} failed to parse: {}", e.emit_to_string(wgsl)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("{name} failed validation: {e:?}"));
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            assert!(
                module
                    .entry_points
                    .iter()
                    .any(|ep| ep.name == stage.entry_point()),
                "{name} is missing {}",
                stage.entry_point()
            );
        }
    }

    #[test]
    fn embedded_shaders_validate() {
        validate("model.wgsl", MODEL_WGSL);
        validate("line.wgsl", LINE_WGSL);
    }

    #[test]
    fn missing_file_is_a_shader_error() {
        let source = ShaderSource::File(PathBuf::from("does/not/exist.wgsl"));
        assert!(matches!(source.load(), Err(ViewerError::Shader(_))));
    }

    #[test]
    fn file_source_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.wgsl");
        std::fs::write(&path, MODEL_WGSL).unwrap();
        let source = ShaderSource::File(path);
        assert_eq!(source.load().unwrap(), MODEL_WGSL);
    }

    #[test]
    fn later_source_replaces_earlier() {
        let mut builder = ShaderBuilder::new("test");
        let _ = builder
            .set_shader(ShaderStage::Vertex, ShaderSource::line())
            .set_shader(ShaderStage::Vertex, ShaderSource::model());
        assert_eq!(builder.source(ShaderStage::Vertex), Some(&ShaderSource::model()));
        assert_eq!(builder.source(ShaderStage::Fragment), None);
    }
}
