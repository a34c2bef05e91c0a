mod common;
mod stored_file;
