use fractic_server_error::{define_client_error, define_internal_error};

// Configuration.
define_client_error!(
    MissingConfigValue,
    "Missing required configuration value: {key}.",
    { key: &str }
);
define_client_error!(
    InvalidConfigValue,
    "Invalid configuration value for {key}: '{value}'.",
    { key: &str, value: &str }
);

// Remote API (PostgREST / Storage).
define_client_error!(
    RemoteRequestRejected,
    "{user_message}",
    { user_message: &str }
);
define_client_error!(
    RemoteRecordNotFound,
    "{table} record '{id}' not found or blocked by row-level security.",
    { table: &str, id: &str }
);
define_internal_error!(
    RemoteRequestFailed,
    "Request to '{url}' failed.",
    { url: &str }
);
define_internal_error!(
    InvalidRemoteResponse,
    "Invalid response from '{table}': could not decode {what}.",
    { table: &str, what: &str }
);
define_client_error!(
    UploadFailed,
    "Upload to '{bucket}/{remote_key}' was rejected.",
    { bucket: &str, remote_key: &str }
);

// IO-related.
define_client_error!(ReadError, "Error reading file: '{path}'.", { path: &str });
define_client_error!(WriteError, "Error writing file: '{path}'.", { path: &str });

// Parsing-related.
define_client_error!(
    InvalidTimestamp,
    "Invalid timestamp: '{value}'.",
    { value: &str }
);
define_client_error!(
    InvalidSessionToken,
    "Invalid session token: {details}.",
    { details: &str }
);
define_internal_error!(CsvExportFailed, "Failed to export rows as CSV.");

// Client records.
define_client_error!(
    MissingLegalName,
    "A razão social do cliente é obrigatória."
);
define_client_error!(
    InvalidCnpj,
    "CNPJ inválido: '{cnpj}' (esperados 14 dígitos).",
    { cnpj: &str }
);

// Demands.
define_client_error!(
    UnknownDemandType,
    "Tipo de demanda desconhecido: '{request_type}'.",
    { request_type: &str }
);
define_client_error!(
    DuplicateOpenDemand,
    "Já existe uma demanda '{request_type}' em aberto para este cliente.",
    { request_type: &str }
);
define_client_error!(
    InvalidStatusTransition,
    "Não é possível mudar a demanda de '{from}' para '{to}'.",
    { from: &str, to: &str }
);
define_client_error!(
    MissingAttachment,
    "Arquivo não encontrado: '{path}'.",
    { path: &str }
);
