pub mod url_source;
