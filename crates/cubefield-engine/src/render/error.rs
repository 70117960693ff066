use std::fmt;

/// Fatal renderer construction error.
///
/// There is no partial-construction state: any of these aborts renderer
/// creation and the host is expected to terminate with the diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A `RendererConfig` field is out of range.
    InvalidConfig(String),
    /// The shader program does not declare a required entry point.
    MissingEntryPoint { program: String, entry_point: String },
    /// The shader module failed to compile.
    ShaderCompilation { program: String, message: String },
    /// The mesh geometry is empty or references vertices out of range.
    InvalidGeometry(String),
    /// A buffer or texture exceeds the device limits.
    ResourceTooLarge { label: &'static str, size: u64, limit: u64 },
    /// wgpu rejected a resource or pipeline (validation or out of memory).
    Device(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid renderer config: {msg}"),
            Self::MissingEntryPoint { program, entry_point } => {
                write!(f, "shader program '{program}' has no entry point '{entry_point}'")
            }
            Self::ShaderCompilation { program, message } => {
                write!(f, "shader program '{program}' failed to compile: {message}")
            }
            Self::InvalidGeometry(msg) => write!(f, "invalid mesh geometry: {msg}"),
            Self::ResourceTooLarge { label, size, limit } => {
                write!(f, "{label} needs {size} bytes but the device allows {limit}")
            }
            Self::Device(msg) => write!(f, "GPU rejected renderer resources: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}
