//! # Account subscriptions
//!
//! Streams changes to the accounts a program owns over the cluster's
//! websocket endpoint.

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use futures::future::BoxFuture;
use futures::stream::{BoxStream, StreamExt};
use solana_client::nonblocking::pubsub_client::PubsubClient;
use solana_client::pubsub_client::PubsubClientError;
use solana_client::rpc_config::RpcProgramAccountsConfig;
use solana_client::rpc_response::{Response, RpcKeyedAccount};
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

/// Ends a subscription on the server side
pub type Unsubscribe = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// A program-owned account as of `slot`
#[derive(Debug, Clone, PartialEq)]
pub struct AccountUpdate {
    /// Slot the notification was produced at
    pub slot: u64,
    /// Changed account
    pub pubkey: Pubkey,
    /// New state; `None` when the node sent an encoding that cannot be decoded
    /// into raw bytes (e.g. `jsonParsed`)
    pub account: Option<Account>,
}

impl AccountUpdate {
    fn from_response(response: Response<RpcKeyedAccount>) -> Option<Self> {
        let Response { context, value } = response;
        match value.pubkey.parse() {
            Ok(pubkey) => Some(Self {
                slot: context.slot,
                pubkey,
                account: value.account.decode(),
            }),
            Err(_) => {
                warn!(pubkey = %value.pubkey, "dropping notification with a malformed key");
                None
            }
        }
    }
}

/// Websocket connection to a cluster
pub struct AccountWatcher {
    pubsub: PubsubClient,
}

impl std::fmt::Debug for AccountWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountWatcher").finish_non_exhaustive()
    }
}

impl AccountWatcher {
    /// Connect to the websocket endpoint of `cluster`
    pub async fn connect(cluster: &Cluster) -> Result<Self> {
        let pubsub = PubsubClient::new(cluster.ws_url())
            .await
            .map_err(subscription_error)?;
        debug!(ws_url = cluster.ws_url(), "websocket connected");
        Ok(Self { pubsub })
    }

    /// Every change to an account owned by `program_id`, until the returned
    /// [`Unsubscribe`] is awaited or the connection drops.
    pub async fn program_subscribe(
        &self,
        program_id: &Pubkey,
        config: Option<RpcProgramAccountsConfig>,
    ) -> Result<(BoxStream<'_, AccountUpdate>, Unsubscribe)> {
        let (stream, unsubscribe) = self
            .pubsub
            .program_subscribe(program_id, config)
            .await
            .map_err(subscription_error)?;
        debug!(program = %program_id, "subscribed to program accounts");
        let updates = stream
            .filter_map(|response| async move { AccountUpdate::from_response(response) })
            .boxed();
        Ok((updates, unsubscribe))
    }

    /// Close the connection
    pub async fn shutdown(self) -> Result<()> {
        self.pubsub.shutdown().await.map_err(subscription_error)
    }
}

fn subscription_error(err: PubsubClientError) -> Error {
    Error::Subscription(err.to_string())
}
