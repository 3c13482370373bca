pub const DEFAULT_API_URL: &str = "http://localhost:8000/analyze";

pub const DEFAULT_PROMPT: &str = "Identify the Victaulic part number in the uploaded images. Provide details about the part if possible.";

pub const DEFAULT_LOG_FILTER: &str = "info";

// prefix of every preview url handed out by the preview store
pub const PREVIEW_URL_PREFIX: &str = "blob:lens/";

// multipart field names expected by the analysis backend
pub const PROMPT_FIELD: &str = "prompt";
pub const FILES_FIELD: &str = "files";
