mod table;
pub use table::TablePage;

mod upload;
pub use upload::UploadPage;
