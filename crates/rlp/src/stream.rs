//! Incremental decoding of items as bytes trickle in.

use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};

use bytes::{Bytes, BytesMut};
use tracing::*;

use crate::decoder::{Bound, RlpDecoder};
use crate::errors::{DecodeError, StreamError};
use crate::item::RlpItem;

/// A source of bytes that can be drained without blocking.
pub trait ByteSource {
    /// Appends every byte that is currently available, returning how many
    /// were appended.  Must not block waiting for more.
    fn pull(&mut self, into: &mut BytesMut) -> io::Result<usize>;
}

impl ByteSource for VecDeque<u8> {
    fn pull(&mut self, into: &mut BytesMut) -> io::Result<usize> {
        let (front, back) = self.as_slices();
        into.extend_from_slice(front);
        into.extend_from_slice(back);
        let n = self.len();
        self.clear();
        Ok(n)
    }
}

/// Drains every chunk already sent.  A disconnected channel simply stops
/// producing bytes.
impl ByteSource for Receiver<Vec<u8>> {
    fn pull(&mut self, into: &mut BytesMut) -> io::Result<usize> {
        let mut n = 0;
        loop {
            match self.try_recv() {
                Ok(chunk) => {
                    n += chunk.len();
                    into.extend_from_slice(&chunk);
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return Ok(n),
            }
        }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn pull(&mut self, into: &mut BytesMut) -> io::Result<usize> {
        (**self).pull(into)
    }
}

/// Decodes top-level items from a [`ByteSource`] as they become complete.
///
/// Not enough bytes yet is not an error, [`RlpStream::has_next`] just reports
/// `false` and a later call retries from the same position.  Malformed input
/// is terminal, the same error is reported from then on.
///
/// Meant for a single consumer.
#[derive(Debug)]
pub struct RlpStream<S> {
    source: S,
    decoder: RlpDecoder,
    buffer: Bytes,
    index: usize,
    next: Option<RlpItem>,
    failure: Option<DecodeError>,
}

impl<S: ByteSource> RlpStream<S> {
    /// Constructs a new instance with an empty buffer.
    pub fn new(source: S, decoder: RlpDecoder) -> Self {
        Self {
            source,
            decoder,
            buffer: Bytes::new(),
            index: 0,
            next: None,
            failure: None,
        }
    }

    /// Returns the number of buffered bytes not yet consumed by an item.
    pub fn buffered(&self) -> usize {
        self.buffer.len() - self.index
    }

    /// Converts back into the source, dropping any buffered bytes.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Returns if a complete item is available, pulling from the source if
    /// there is not one already.
    ///
    /// Idempotent: calling this repeatedly never moves past an item.
    pub fn has_next(&mut self) -> Result<bool, StreamError> {
        if self.next.is_some() {
            return Ok(true);
        }

        if let Some(e) = &self.failure {
            return Err(e.clone().into());
        }

        self.refill()?;
        self.try_decode()
    }

    /// Returns the next item and moves past it, or `None` if there is not a
    /// complete one yet.
    pub fn next_item(&mut self) -> Result<Option<RlpItem>, StreamError> {
        if !self.has_next()? {
            return Ok(None);
        }

        Ok(self.next.take().inspect(|item| self.advance(item)))
    }

    /// Pulls whatever the source has, compacting consumed bytes out of the
    /// buffer.
    fn refill(&mut self) -> io::Result<()> {
        let mut fresh = BytesMut::new();
        let n = self.source.pull(&mut fresh)?;
        if n == 0 {
            return Ok(());
        }

        let kept = &self.buffer[self.index..];
        let mut buf = BytesMut::with_capacity(kept.len() + fresh.len());
        buf.extend_from_slice(kept);
        buf.extend_from_slice(&fresh);

        trace!(kept = kept.len(), pulled = n, "refilled rlp stream buffer");
        self.buffer = buf.freeze();
        self.index = 0;
        Ok(())
    }

    /// Attempts to decode at the cursor, caching the item on success.
    fn try_decode(&mut self) -> Result<bool, StreamError> {
        if self.index == self.buffer.len() {
            return Ok(false);
        }

        match self.decoder.wrap_at(&self.buffer, self.index, Bound::Open) {
            Ok(item) => {
                self.next = Some(item);
                Ok(true)
            }
            Err(e) if e.is_recoverable() => {
                trace!(%e, "waiting on more bytes");
                Ok(false)
            }
            Err(e) => {
                debug!(%e, "rlp stream hit malformed input");
                self.failure = Some(e.clone());
                Err(e.into())
            }
        }
    }

    fn advance(&mut self, item: &RlpItem) {
        self.index = item.end_index();
    }
}

/// `None` means no complete item is available yet, not that the stream is
/// over.  A decode failure is yielded once.
impl<S: ByteSource> Iterator for RlpStream<S> {
    type Item = Result<RlpItem, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failure.is_some() {
            return None;
        }

        self.next_item().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use hex_literal::hex;

    use super::*;
    use crate::{Malformed, RLP_STRICT};

    #[test]
    fn test_chunked_list() {
        let mut source = VecDeque::<u8>::new();
        let mut stream = RLP_STRICT.stream(&mut source);

        assert!(!stream.has_next().expect("test: has_next"));

        stream.source.extend(hex!("c2"));
        assert!(!stream.has_next().expect("test: has_next"));
        assert!(stream.next_item().expect("test: next").is_none());

        stream.source.extend(hex!("8080"));
        assert!(stream.has_next().expect("test: has_next"));
        let item = stream.next_item().expect("test: next").expect("test: item");
        assert_eq!(item.encoding(), hex!("c28080"));
        assert_eq!(item.as_list().expect("test: list").count().expect("test: count"), 2);
        assert!(!stream.has_next().expect("test: has_next"));
    }

    #[test]
    fn test_has_next_idempotent() {
        let mut source = VecDeque::from(hex!("8363617483646f").to_vec());
        let mut stream = RLP_STRICT.stream(&mut source);

        for _ in 0..3 {
            assert!(stream.has_next().expect("test: has_next"));
            assert_eq!(stream.buffered(), 7);
        }

        let cat = stream.next_item().expect("test: next").expect("test: item");
        assert_eq!(cat.data(), b"cat");

        for _ in 0..3 {
            assert!(!stream.has_next().expect("test: has_next"));
            assert_eq!(stream.buffered(), 3);
        }

        stream.source.push_back(0x67);
        let dog = stream.next_item().expect("test: next").expect("test: item");
        assert_eq!(dog.data(), b"dog");

        // still valid after the buffer was compacted
        assert_eq!(cat.data(), b"cat");
    }

    #[test]
    fn test_malformed_is_terminal() {
        let mut source = VecDeque::from(hex!("80b800").to_vec());
        let mut stream = RLP_STRICT.stream(&mut source);

        assert!(stream.next_item().expect("test: next").is_some());
        let err = stream.has_next().unwrap_err();
        match err {
            StreamError::Decode(e) => {
                assert_eq!(e.kind(), Some(&Malformed::LeadingZeroLength));
            }
            StreamError::Io(e) => panic!("test: unexpected io error {e}"),
        }

        // reported again, without retrying
        assert!(stream.has_next().is_err());
    }

    #[test]
    fn test_iterator_over_channel() {
        let (tx, rx) = mpsc::channel();
        let mut stream = RLP_STRICT.stream(rx);

        tx.send(hex!("83636174").to_vec()).expect("test: send");
        tx.send(hex!("83").to_vec()).expect("test: send");

        let items: Vec<_> = stream.by_ref().collect::<Result<_, _>>().expect("test: items");
        assert_eq!(items.len(), 1);

        tx.send(hex!("646f67c0").to_vec()).expect("test: send");
        let items: Vec<_> = stream.by_ref().collect::<Result<_, _>>().expect("test: items");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].data(), b"dog");
        assert!(items[1].is_list());
    }

    #[test]
    fn test_iterator_yields_failure_once() {
        let mut source = VecDeque::from(hex!("b801").to_vec());
        let mut stream = RLP_STRICT.stream(&mut source);
        assert!(stream.next().expect("test: failure").is_err());
        assert!(stream.next().is_none());
    }
}
