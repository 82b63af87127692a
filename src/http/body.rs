use futures::TryStreamExt;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use std::io;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::io::ReaderStream;

/// Response body used by every handler response
pub type ServeBody = BoxBody<Bytes, io::Error>;

const READ_CHUNK: usize = 64 * 1024;

pub fn empty() -> ServeBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

pub fn full(data: impl Into<Bytes>) -> ServeBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Stream at most `len` bytes from the file's current position
pub fn from_file(file: File, len: u64) -> ServeBody {
    from_reader(file.take(len))
}

fn from_reader(reader: impl AsyncRead + Send + Sync + 'static) -> ServeBody {
    let stream = ReaderStream::with_capacity(reader, READ_CHUNK);
    StreamBody::new(stream.map_ok(Frame::data)).boxed()
}
