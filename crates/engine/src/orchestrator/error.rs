use super::ports::BoxError;

#[derive(Debug)]
pub enum OrchestratorError {
    Provider(BoxError),
    Query(BoxError),
    NoQueryExecutor,
}

impl std::fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(e) => write!(f, "metrics provider: {e}"),
            Self::Query(e) => write!(f, "query executor: {e}"),
            Self::NoQueryExecutor => write!(f, "no query executor configured"),
        }
    }
}

impl std::error::Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Provider(e) | Self::Query(e) => Some(e.as_ref()),
            Self::NoQueryExecutor => None,
        }
    }
}
