use ircd_chanmode::handlers::{ModeChange, Outbound, Visibility, handle_channel_mode, handle_tmode};
use ircd_chanmode::state::{Channel, Client, ClientDirectory, ClientRegistry, MemberFlags, Membership};
use ircd_chanmode::{Config, HandlerResult};

pub const SERVER: &str = "irc.test";
pub const CHANNEL: &str = "#rust";
pub const CREATED: i64 = 1_650_000_000;

/// One local server (`irc.test`, SID 001) linked to `hub.test` (SID 002).
///
/// Local users: `op` (chanop), `half` (halfop), `user` (member),
/// `outsider` (not joined). Remote: `far` (member, behind the hub).
#[allow(dead_code)]
pub struct TestNetwork {
    pub config: Config,
    pub clients: ClientRegistry,
    pub channel: Channel,
    pub out: Vec<Outbound>,
}

#[allow(dead_code)]
impl TestNetwork {
    pub fn new() -> Self {
        let mut clients = ClientRegistry::new();
        clients.insert(Client::local_user("001AAAAAA", "op", "op", "op.example"));
        clients.insert(Client::local_user("001AAAAAB", "half", "half", "half.example"));
        clients.insert(Client::local_user("001AAAAAC", "user", "user", "user.example"));
        clients.insert(Client::local_user("001AAAAAD", "outsider", "out", "out.example"));
        clients.insert(Client::remote_user("002AAAAAA", "far", "far", "far.example"));
        clients.insert(Client::server("002", "hub.test", true));

        let mut channel = Channel::new(CHANNEL, CREATED);
        channel.add_member(Membership::new("001AAAAAA", true).with_flags(MemberFlags::CHANOP));
        channel.add_member(Membership::new("001AAAAAB", true).with_flags(MemberFlags::HALFOP));
        channel.add_member(Membership::new("001AAAAAC", true));
        channel.add_member(Membership::new("002AAAAAA", false));

        Self {
            config: Config::for_server(SERVER, "001"),
            clients,
            channel,
            out: Vec::new(),
        }
    }

    pub fn client(&self, nick: &str) -> Client {
        match self.clients.find_by_nick(nick) {
            Some(c) => c.clone(),
            None => panic!("unknown test client {}", nick),
        }
    }

    pub fn hub(&self) -> Client {
        match self.clients.find_by_uid("002") {
            Some(c) => c.clone(),
            None => panic!("hub missing"),
        }
    }

    /// `MODE #rust <argv...>` from `nick`.
    pub fn mode(&mut self, nick: &str, argv: &[&str]) -> Vec<ModeChange> {
        let source = self.client(nick);
        self.mode_as(&source, argv)
    }

    pub fn mode_as(&mut self, source: &Client, argv: &[&str]) -> Vec<ModeChange> {
        match handle_channel_mode(
            &self.config,
            &self.clients,
            &mut self.out,
            source,
            Some(&mut self.channel),
            CHANNEL,
            argv,
        ) {
            Ok(changes) => changes,
            Err(e) => panic!("MODE failed: {}", e),
        }
    }

    /// `TMODE <args...>` from `source`.
    pub fn tmode(&mut self, source: &Client, args: &[&str]) -> HandlerResult<Vec<ModeChange>> {
        handle_tmode(&self.config, &self.clients, &mut self.out, source, Some(&mut self.channel), args)
    }

    pub fn take(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.out)
    }

    pub fn replies(&self) -> Vec<&str> {
        self.out
            .iter()
            .filter_map(|o| match o {
                Outbound::Reply { line, .. } => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn channel_lines(&self, audience: Visibility) -> Vec<&str> {
        self.out
            .iter()
            .filter_map(|o| match o {
                Outbound::Channel { audience: a, line, .. } if *a == audience => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn server_lines(&self) -> Vec<&str> {
        self.out
            .iter()
            .filter_map(|o| match o {
                Outbound::Servers { line, .. } => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }
}
