pub mod cursor;
pub mod etag;
pub mod time;
