pub type AppResult<T> = Result<T, AppError>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("page `{page}` failed to render {path}")]
    PageRender {
        path: String,
        page: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("render of {path} requested while another render is in progress")]
    RenderInProgress { path: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl AppError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn page_render(path: impl Into<String>, page: &'static str, source: BoxError) -> Self {
        Self::PageRender {
            path: path.into(),
            page,
            source,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
