//! Hash map with separately chained buckets and a doubling rehash policy that
//! triggers once the load factor crosses one half.

mod map;

pub use self::map::{ChainMap, ChainMapIntoIter, ChainMapIter, ChainMapIterMut};

use std::error;
use std::fmt;
use std::result;

#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    KeyNotFound,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "Key not found."),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
