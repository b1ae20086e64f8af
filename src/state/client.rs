//! Client identity as seen by channel mode handling.
//!
//! A `Client` is either a user (local or relayed from a peer) or a server.
//! Mode handling only ever reads it.

use ircd_proto::Prefix;
use std::net::IpAddr;

/// Persistent identifier (TS6 UID for users, SID for servers).
pub type Uid = String;

/// What kind of entity a client record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    /// A user connection.
    User,
    /// A peer server (or this server acting on its own behalf).
    Server,
}

/// A connected client or server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub uid: Uid,
    /// Nickname for users, server name for servers.
    pub name: String,
    pub username: String,
    /// Displayed (possibly cloaked) hostname.
    pub host: String,
    /// Textual form of the socket address.
    pub sockhost: String,
    pub ip: Option<IpAddr>,
    pub kind: ClientKind,
    /// Directly connected to this server.
    pub local: bool,
    /// IRC operator.
    pub oper: bool,
    /// Network service (ChanServ and friends).
    pub service: bool,
    /// Server marked hidden in its link block.
    pub hidden: bool,
}

impl Client {
    /// A user directly connected to this server.
    pub fn local_user(
        uid: impl Into<Uid>,
        nick: impl Into<String>,
        user: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        let host = host.into();
        Self {
            uid: uid.into(),
            name: nick.into(),
            username: user.into(),
            sockhost: host.clone(),
            host,
            ip: None,
            kind: ClientKind::User,
            local: true,
            oper: false,
            service: false,
            hidden: false,
        }
    }

    /// A user introduced by a peer server.
    pub fn remote_user(
        uid: impl Into<Uid>,
        nick: impl Into<String>,
        user: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            local: false,
            ..Self::local_user(uid, nick, user, host)
        }
    }

    /// A server; `local` is true for a directly linked peer.
    pub fn server(sid: impl Into<Uid>, name: impl Into<String>, local: bool) -> Self {
        Self {
            uid: sid.into(),
            name: name.into(),
            username: String::new(),
            host: String::new(),
            sockhost: String::new(),
            ip: None,
            kind: ClientKind::Server,
            local,
            oper: false,
            service: false,
            hidden: false,
        }
    }

    pub fn with_ip(mut self, ip: IpAddr) -> Self {
        self.ip = Some(ip);
        self.sockhost = ip.to_string();
        self
    }

    pub fn with_sockhost(mut self, sockhost: impl Into<String>) -> Self {
        self.sockhost = sockhost.into();
        self
    }

    pub fn opered(mut self) -> Self {
        self.oper = true;
        self
    }

    pub fn as_service(mut self) -> Self {
        self.service = true;
        self
    }

    pub fn as_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    #[inline]
    pub fn is_server(&self) -> bool {
        self.kind == ClientKind::Server
    }

    #[inline]
    pub fn is_user(&self) -> bool {
        self.kind == ClientKind::User
    }

    /// A user connected directly to this server.
    #[inline]
    pub fn is_my_client(&self) -> bool {
        self.local && self.is_user()
    }

    /// Anything (user or server) with a socket on this server.
    #[inline]
    pub fn is_my_connect(&self) -> bool {
        self.local
    }

    /// `nick!user@host` for users, server name for servers.
    pub fn prefix(&self) -> Prefix {
        match self.kind {
            ClientKind::User => Prefix::new(&self.name, &self.username, &self.host),
            ClientKind::Server => Prefix::server(&self.name),
        }
    }
}
