mod codec;
mod table_store;

pub use codec::{parse_tables, write_record, write_tables, LABEL_CLOSE, LABEL_OPEN, SENTINEL};
pub use table_store::{generate_tables, TableStore};
