// History size is kept in bytes but edited in megabytes
pub const MIB: i64 = 1_048_576; // 1024 * 1024

// Name stored for a key file that was generated in this session and not loaded from disk
pub const GENERATED_KEY_FILE_NAME: &str = "Generated";

// Number of random bytes used as the key of a generated key file
pub const GENERATED_KEY_SIZE: usize = 32;

pub const KEY_FILE_XML_VERSION: &str = "2.0";

// Character used to render the masked password placeholder
pub const PASSWORD_MASK_CHAR: char = '\u{2022}';

pub const DEFAULT_DESKTOP_LINK: &str = "https://github.com/keeweb/keeweb/releases/latest";

pub mod mime_type {
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const TEXT_XML: &str = "text/xml";
}

// Values used by the key file dropdown options
pub mod key_file_option_value {
    pub const USE_NEW: &str = "ex";
    pub const USE_OLD: &str = "old";
    pub const GENERATE: &str = "gen";
    pub const NO_KEY_FILE: &str = "none";
}

pub mod label {
    pub const USE_GENERATED_KEY_FILE: &str = "Use generated key file";
    pub const GENERATE_NEW_KEY_FILE: &str = "Generate new key file";
    pub const DONT_USE_KEY_FILE: &str = "Don't use key file";

    pub const EMPTY_PASSWORD_HEADER: &str = "Empty password";
    pub const EMPTY_PASSWORD_BODY: &str =
        "Please, enter the password. You will use it the next time you open this file.";

    pub const NOT_IMPLEMENTED_HEADER: &str = "Not implemented";
    pub const NOT_IMPLEMENTED_BODY: &str = "Sorry, this feature is not implemented yet";

    pub const KEY_FILE_ERROR_HEADER: &str = "Key file error";
}

pub mod key_file_xml_element {
    pub const KEY_FILE: &[u8] = b"KeyFile";
    pub const KEY_FILE_META: &[u8] = b"Meta";
    pub const KEY_FILE_VERSION: &[u8] = b"Version";
    pub const KEY_FILE_KEY: &[u8] = b"Key";
    pub const KEY_FILE_DATA: &[u8] = b"Data";
    pub const KEY_FILE_DATA_HASH: &[u8] = b"Hash";
}

// Tags of the database meta fragment produced by the xml export
pub mod meta_xml_element {
    pub const META: &str = "Meta";
    pub const GENERATOR: &str = "Generator";
    pub const DATABASE_NAME: &str = "DatabaseName";
    pub const DEFAULT_USER_NAME: &str = "DefaultUserName";
    pub const RECYCLE_BIN_ENABLED: &str = "RecycleBinEnabled";
    pub const HISTORY_MAX_ITEMS: &str = "HistoryMaxItems";
    pub const HISTORY_MAX_SIZE: &str = "HistoryMaxSize";
}

pub const GENERATOR_NAME: &str = "KdbxFileSettings";

// Used for a newly created database
pub mod new_db_defaults {
    pub const DATABASE_NAME: &str = "New";
    pub const HISTORY_MAX_ITEMS: i32 = 10;
    pub const HISTORY_MAX_SIZE: i64 = 6 * super::MIB;
    pub const KEY_ENCRYPTION_ROUNDS: i64 = 6000;
}
