//! Length-prefixed MessagePack framing for out-of-process clients.
//!
//! Each frame is a little-endian `u32` body length followed by a
//! MessagePack body (`rmp_serde::to_vec_named`). A client sends one
//! [`Command`] frame and reads one [`Output`] frame back; there is no
//! pipelining.

use std::io::{self, Read, Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use edidmap_core::FormHandle;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::{Client, Transport};
use crate::error::{Error, Result};
use crate::message::{Message, MessageKind, Payload};
use crate::{Command, Output, Responder};

/// Largest frame body accepted in either direction
pub const MAX_FRAME_LEN: usize = 1 << 20;

/// Write one frame
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    let body = rmp_serde::to_vec_named(value)?;
    if body.len() > MAX_FRAME_LEN {
        return Err(Error::FrameTooLarge {
            len: body.len(),
            max: MAX_FRAME_LEN,
        });
    }
    writer.write_u32::<LittleEndian>(body.len() as u32)?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Read one frame.
///
/// Returns `Ok(None)` on a clean end of stream before the length prefix.
/// A stream that ends inside the prefix or the body is an `Io` error.
pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<Option<T>> {
    let mut prefix = [0u8; 4];
    loop {
        match reader.read(&mut prefix[..1]) {
            Ok(0) => return Ok(None),
            Ok(_) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    reader.read_exact(&mut prefix[1..])?;
    let len = LittleEndian::read_u32(&prefix) as usize;
    if len > MAX_FRAME_LEN {
        return Err(Error::FrameTooLarge {
            len,
            max: MAX_FRAME_LEN,
        });
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(rmp_serde::from_slice(&body)?))
}

/// Answer command frames from `reader` until the peer closes the stream.
///
/// Returns the number of commands answered.
pub fn serve_connection<H, R, W>(responder: &Responder<H>, reader: &mut R, writer: &mut W) -> Result<u64>
where
    H: FormHandle,
    R: Read,
    W: Write,
{
    let mut answered = 0u64;
    loop {
        let command = match read_frame::<_, Command>(reader) {
            Ok(Some(command)) => command,
            Ok(None) => break,
            // The length prefix bounded the bad body; the stream is still in sync
            Err(Error::Decode(e)) => {
                debug!(target: "edidmap::wire", error = %e, "malformed frame dropped");
                continue;
            }
            Err(e) => return Err(e),
        };
        let name = command.name();
        let output = responder.execute(command);
        debug!(target: "edidmap::wire", command = name, output = output.name(), "answered");
        write_frame(writer, &output)?;
        answered += 1;
    }
    debug!(target: "edidmap::wire", answered, "connection closed");
    Ok(answered)
}

/// [`Transport`] over a framed byte stream
pub struct FramedTransport<S: Read + Write> {
    stream: Mutex<S>,
}

impl<S: Read + Write> FramedTransport<S> {
    /// Wrap a connected stream
    pub fn new(stream: S) -> Self {
        Self {
            stream: Mutex::new(stream),
        }
    }

    /// Send one command and wait for its output
    pub fn call(&self, command: &Command) -> Result<Output> {
        let mut stream = self.stream.lock();
        write_frame(&mut *stream, command)?;
        read_frame(&mut *stream)?.ok_or(Error::Closed)
    }

    /// Ask the responder whether readiness has been broadcast
    pub fn is_ready(&self) -> Result<bool> {
        match self.call(&Command::IsReady)? {
            Output::Bool(ready) => Ok(ready),
            other => Err(Error::UnexpectedOutput {
                command: "IsReady",
                output: other.name(),
            }),
        }
    }

    /// Unwrap the stream
    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }

    fn answer(&self, message: &mut Message<'_>) -> Result<bool> {
        let kind = message.kind;
        match (kind, &mut message.payload) {
            (MessageKind::Query, Payload::Query(data)) => {
                let command = Command::Query {
                    editor_id: data.editor_id.as_deref().map(str::to_string),
                };
                data.form_id = match self.call(&command)? {
                    Output::FormId(id) => id,
                    other => return Err(unexpected(&command, &other)),
                };
                Ok(true)
            }
            (MessageKind::ReverseQuery, Payload::Query(data)) => {
                let command = Command::reverse_query(data.form_id);
                data.editor_id = match self.call(&command)? {
                    Output::EditorId(id) => id,
                    other => return Err(unexpected(&command, &other)),
                };
                Ok(true)
            }
            (MessageKind::RequestReady, _) => {
                let Some(listener) = message.sender else {
                    return Ok(false);
                };
                let command = Command::RequestReady { listener };
                match self.call(&command)? {
                    Output::Bool(replayed) => Ok(replayed),
                    other => Err(unexpected(&command, &other)),
                }
            }
            _ => Ok(false),
        }
    }
}

fn unexpected(command: &Command, output: &Output) -> Error {
    Error::UnexpectedOutput {
        command: command.name(),
        output: output.name(),
    }
}

impl<S: Read + Write> Transport for FramedTransport<S> {
    fn dispatch(&self, message: &mut Message<'_>) -> bool {
        match self.answer(message) {
            Ok(answered) => answered,
            Err(e) => {
                warn!(target: "edidmap::wire", kind = %message.kind, error = %e, "dispatch failed");
                false
            }
        }
    }
}

impl<S: Read + Write> std::fmt::Debug for FramedTransport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramedTransport").finish_non_exhaustive()
    }
}

/// Build a client over `stream`, marked ready if the responder already is.
///
/// A remote client cannot receive the readiness broadcast; callers poll
/// with [`sync_ready`] until it reports true.
pub fn connect_framed<S: Read + Write>(stream: S) -> Result<Client<FramedTransport<S>>> {
    let client = Client::new(FramedTransport::new(stream));
    sync_ready(&client)?;
    Ok(client)
}

/// Poll the responder's readiness and mark `client` ready once it is.
pub fn sync_ready<S: Read + Write>(client: &Client<FramedTransport<S>>) -> Result<bool> {
    if client.is_ready() {
        return Ok(true);
    }
    let ready = client.transport().is_ready()?;
    if ready {
        client.ready_listener().on_ready();
    }
    Ok(ready)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ListenerId, QueryData};
    use crate::HostEvent;
    use edidmap_core::{FormId, MapperConfig};
    use edidmap_index::SharedIndex;
    use std::io::Cursor;
    use std::sync::Arc;

    fn responder() -> Responder {
        let index = SharedIndex::new();
        index.capture(Some("WeapIronDagger"), Some(FormId(0x00012EB7)));
        Responder::new(index, &MapperConfig::default())
    }

    #[test]
    fn test_frame_layout() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &Command::Ping).unwrap();
        let len = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        assert_eq!(len, buf.len() - 4);

        let mut cursor = Cursor::new(buf);
        let back: Option<Command> = read_frame(&mut cursor).unwrap();
        assert_eq!(back, Some(Command::Ping));
        let end: Option<Command> = read_frame(&mut cursor).unwrap();
        assert_eq!(end, None);
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&((MAX_FRAME_LEN as u32) + 1).to_le_bytes());
        let result: Result<Option<Command>> = read_frame(&mut Cursor::new(buf));
        assert!(matches!(result, Err(Error::FrameTooLarge { .. })));
    }

    #[test]
    fn test_truncated_body_is_io_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&[0x90; 3]);
        let result: Result<Option<Command>> = read_frame(&mut Cursor::new(buf));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_truncated_prefix_is_io_error() {
        let result: Result<Option<Command>> = read_frame(&mut Cursor::new(vec![5u8, 0]));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_serve_connection_skips_malformed_frame() {
        let responder = responder();
        let mut requests = Vec::new();
        requests.extend_from_slice(&1u32.to_le_bytes());
        requests.push(0xC1);
        write_frame(&mut requests, &Command::query("WeapIronDagger")).unwrap();

        let mut replies = Vec::new();
        let answered =
            serve_connection(&responder, &mut Cursor::new(requests), &mut replies).unwrap();
        assert_eq!(answered, 1);

        let mut cursor = Cursor::new(replies);
        let reply: Output = read_frame(&mut cursor).unwrap().unwrap();
        assert_eq!(reply, Output::FormId(FormId(0x00012EB7)));
        let end: Option<Output> = read_frame(&mut cursor).unwrap();
        assert_eq!(end, None);
    }

    #[test]
    fn test_serve_connection_stops_on_oversized_frame() {
        let responder = responder();
        let mut requests = Vec::new();
        requests.extend_from_slice(&((MAX_FRAME_LEN as u32) + 1).to_le_bytes());
        let mut replies = Vec::new();
        let result = serve_connection(&responder, &mut Cursor::new(requests), &mut replies);
        assert!(matches!(result, Err(Error::FrameTooLarge { .. })));
        assert!(replies.is_empty());
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.push(0xC1);
        let result: Result<Option<Command>> = read_frame(&mut Cursor::new(buf));
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_serve_connection_answers_each_command() {
        let responder = responder();
        let mut requests = Vec::new();
        write_frame(&mut requests, &Command::query("WEAPIRONDAGGER")).unwrap();
        write_frame(&mut requests, &Command::reverse_query(FormId(0x00012EB7))).unwrap();
        write_frame(&mut requests, &Command::Size).unwrap();

        let mut replies = Vec::new();
        let answered =
            serve_connection(&responder, &mut Cursor::new(requests), &mut replies).unwrap();
        assert_eq!(answered, 3);

        let mut cursor = Cursor::new(replies);
        let first: Output = read_frame(&mut cursor).unwrap().unwrap();
        assert_eq!(first, Output::FormId(FormId(0x00012EB7)));
        let second: Output = read_frame(&mut cursor).unwrap().unwrap();
        assert_eq!(second, Output::EditorId(Some(Arc::from("weapirondagger"))));
        let third: Output = read_frame(&mut cursor).unwrap().unwrap();
        assert_eq!(third, Output::Uint(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_framed_client_over_socket() {
        use std::os::unix::net::UnixStream;

        let responder = Arc::new(responder());
        let (server, client_stream) = UnixStream::pair().unwrap();
        let served = {
            let responder = Arc::clone(&responder);
            std::thread::spawn(move || {
                let mut reader = server.try_clone().unwrap();
                let mut writer = server;
                serve_connection(&responder, &mut reader, &mut writer).unwrap()
            })
        };

        let client = connect_framed(client_stream).unwrap();
        assert!(!client.is_ready());
        assert_eq!(client.lookup("WeapIronDagger"), FormId::NULL);

        responder.on_host_event(HostEvent::GameInitialized);
        assert!(sync_ready(&client).unwrap());
        assert_eq!(client.lookup("weapirondagger"), FormId(0x00012EB7));
        assert_eq!(
            client.reverse_lookup(FormId(0x00012EB7)).as_deref(),
            Some("weapirondagger")
        );
        assert_eq!(client.lookup("Missing"), FormId::NULL);

        let mut data = QueryData::default();
        assert!(client.transport().dispatch(&mut Message::query(&mut data)));
        assert_eq!(data.form_id, FormId::NULL);

        // Unregistered listener: nothing to replay to
        let mut msg = Message::request_ready(ListenerId(99));
        assert!(!client.transport().dispatch(&mut msg));

        drop(client);
        // IsReady, IsReady, Query, ReverseQuery, Query, Query, RequestReady
        assert_eq!(served.join().unwrap(), 7);
    }
}
