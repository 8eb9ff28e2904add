pub mod request_stream;
