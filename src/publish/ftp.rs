//! FTP uploads via `suppaftp`

use super::Uploader;
use crate::error::PublishError;
use std::fmt;
use std::io::Cursor;
use std::net::ToSocketAddrs;
use std::time::Duration;
use suppaftp::FtpStream;
use suppaftp::types::FileType;
use tracing::{debug, warn};

/// Where and as whom to log in
#[derive(Clone)]
pub struct FtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Bound on connecting and on each read or write of the session
    pub timeout: Duration,
}

impl fmt::Debug for FtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Logged-in binary-mode FTP session
pub struct FtpUploader {
    stream: FtpStream,
}

impl FtpUploader {
    /// Connect, log in and switch to binary transfers
    ///
    /// Each resolved address is tried in turn, waiting at most
    /// `settings.timeout` for each.
    ///
    /// # Errors
    /// Returns `PublishError::Connect` if any of those steps fails.
    pub fn connect(settings: &FtpSettings) -> Result<Self, PublishError> {
        let connect_err = |reason: String| PublishError::Connect {
            host: settings.host.clone(),
            reason,
        };

        let addrs = (settings.host.as_str(), settings.port)
            .to_socket_addrs()
            .map_err(|err| connect_err(err.to_string()))?;
        let mut last_err = format!("{} did not resolve", settings.host);
        let mut connected = None;
        for addr in addrs {
            match FtpStream::connect_timeout(addr, settings.timeout) {
                Ok(stream) => {
                    connected = Some(stream);
                    break;
                }
                Err(err) => {
                    debug!("connect to {addr} failed: {err}");
                    last_err = err.to_string();
                }
            }
        }
        let mut stream = connected.ok_or_else(|| connect_err(last_err))?;

        let tcp = stream.get_ref();
        tcp.set_read_timeout(Some(settings.timeout))
            .and_then(|()| tcp.set_write_timeout(Some(settings.timeout)))
            .map_err(|err| connect_err(err.to_string()))?;

        stream
            .login(&settings.user, &settings.password)
            .map_err(|err| connect_err(format!("login rejected: {err}")))?;
        stream
            .transfer_type(FileType::Binary)
            .map_err(|err| connect_err(err.to_string()))?;

        debug!("connected to {}:{}", settings.host, settings.port);
        Ok(Self { stream })
    }

    /// Close the session; a failed goodbye is only logged
    pub fn quit(mut self) {
        if let Err(err) = self.stream.quit() {
            warn!("FTP quit failed: {err}");
        }
    }
}

impl Uploader for FtpUploader {
    fn upload(&mut self, remote: &str, bytes: &[u8]) -> Result<(), PublishError> {
        let mut reader = Cursor::new(bytes);
        self.stream
            .put_file(remote, &mut reader)
            .map(|written| debug!("stored {remote} ({written} bytes)"))
            .map_err(|err| PublishError::Upload {
                name: remote.to_string(),
                reason: err.to_string(),
            })
    }
}
