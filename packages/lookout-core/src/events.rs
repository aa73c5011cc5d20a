mod constants;
pub use constants::*;

use serde::{Deserialize, Serialize};

use crate::error::{AttributeNotFound, EventNotFound};
use crate::prelude::*;

// A batched transaction commits all its messages atomically but emits one
// interleaved log. These types keep the message boundaries, so assertions
// about "the staking event of message 1" can't be broken by whatever
// message 0 happened to emit.

/// One attribute of an emitted event.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TxAttribute {
    pub key: String,
    pub value: String,
}

/// One event emitted by one message, with its attributes in emission order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TxEvent {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub attributes: Vec<TxAttribute>,
}

impl TxEvent {
    pub fn new(ty: impl ToString) -> Self {
        Self {
            ty: ty.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn add_attribute(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.attributes.push(TxAttribute {
            key: key.to_string(),
            value: value.to_string(),
        });
        self
    }

    // also matches the wasm- prefixed form a contract-emitted event gets
    pub fn is_type(&self, ty: &str) -> bool {
        type_matches(&self.ty, ty)
    }

    /// First value of the attribute with the given key.
    /// A missing attribute is a structured failure, never a default:
    /// silently returning "" would mask a renamed attribute upstream.
    pub fn attr(&self, key: &str) -> Result<&str, AttributeNotFound> {
        self.maybe_attr(key).ok_or_else(|| AttributeNotFound {
            ty: self.ty.clone(),
            key: key.to_string(),
        })
    }

    pub fn maybe_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

/// One row of the flattened event log: a single attribute, tagged with the
/// event type that carried it and the message that emitted it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TxLogEntry {
    pub msg_index: u32,
    #[serde(rename = "type")]
    pub ty: String,
    pub key: String,
    pub value: String,
}

/// The decoded event log of one transaction, queryable both per message
/// and as one flat emission-ordered sequence.
///
/// Immutable once built; every accessor is a pure lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxEvents {
    msgs: Vec<Vec<TxEvent>>,
    entries: Vec<TxLogEntry>,
}

fn type_matches(actual: &str, expected: &str) -> bool {
    if actual == expected {
        true
    } else {
        actual == format!("wasm-{}", expected)
    }
}

impl TxEvents {
    /// Build from per-message event groups; position in the outer vec IS
    /// the message index, so every flat entry's index is in range by
    /// construction.
    pub fn from_message_events(msgs: Vec<Vec<TxEvent>>) -> Self {
        let entries = msgs
            .iter()
            .enumerate()
            .flat_map(|(msg_index, events)| {
                events.iter().flat_map(move |event| {
                    event.attributes.iter().map(move |attr| TxLogEntry {
                        msg_index: msg_index as u32,
                        ty: event.ty.clone(),
                        key: attr.key.clone(),
                        value: attr.value.clone(),
                    })
                })
            })
            .collect();

        Self { msgs, entries }
    }

    /// Decode the SDK's `raw_log` json, the per-message shape
    /// `[{"msg_index":N,"events":[...]}]` (a zero index is omitted
    /// in that encoding).
    pub fn from_raw_log(raw_log: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct RawMsgLog {
            #[serde(default)]
            msg_index: u32,
            #[serde(default)]
            events: Vec<TxEvent>,
        }

        let logs: Vec<RawMsgLog> = serde_json::from_str(raw_log)
            .context("transaction raw log is not the expected json shape")?;

        let msg_count = logs.iter().map(|log| log.msg_index + 1).max().unwrap_or(0);
        let mut msgs = vec![Vec::new(); msg_count as usize];
        for log in logs {
            msgs[log.msg_index as usize].extend(log.events);
        }

        Ok(Self::from_message_events(msgs))
    }

    pub fn msg_count(&self) -> usize {
        self.msgs.len()
    }

    /// The flat view, in emission order across all messages.
    pub fn entries(&self) -> &[TxLogEntry] {
        &self.entries
    }

    /// Events emitted by the message at `msg_index` (empty for an index
    /// past the end).
    pub fn events_at(&self, msg_index: u32) -> &[TxEvent] {
        self.msgs
            .get(msg_index as usize)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    }

    /// All flat entries of the given event type, in original emission
    /// order, duplicates preserved.
    pub fn filter_by_type<'a>(&'a self, ty: &'a str) -> impl Iterator<Item = &'a TxLogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| type_matches(&entry.ty, ty))
    }

    /// The first event of the given type emitted by the message at
    /// `msg_index`, and only that message.
    pub fn event_at(&self, msg_index: u32, ty: &str) -> Result<&TxEvent, EventNotFound> {
        let events = self
            .msgs
            .get(msg_index as usize)
            .ok_or(EventNotFound::NoSuchMessage { msg_index })?;

        events
            .iter()
            .find(|event| event.is_type(ty))
            .ok_or_else(|| EventNotFound::InMessage {
                msg_index,
                ty: ty.to_string(),
            })
    }

    /// The first event of the given type anywhere in the transaction.
    pub fn event_first_by_type(&self, ty: &str) -> Result<&TxEvent, EventNotFound> {
        self.msgs
            .iter()
            .flatten()
            .find(|event| event.is_type(ty))
            .ok_or_else(|| EventNotFound::InTx { ty: ty.to_string() })
    }

    /// The first value of `key` among events of the given type, anywhere
    /// in the transaction.
    pub fn attr_first(&self, ty: &str, key: &str) -> Result<&str, AttributeNotFound> {
        self.msgs
            .iter()
            .flatten()
            .filter(|event| event.is_type(ty))
            .find_map(|event| event.maybe_attr(key))
            .ok_or_else(|| AttributeNotFound {
                ty: ty.to_string(),
                key: key.to_string(),
            })
    }
}

impl From<&lookout_proto::abci::StringEvent> for TxEvent {
    fn from(event: &lookout_proto::abci::StringEvent) -> Self {
        Self {
            ty: event.r#type.clone(),
            attributes: event
                .attributes
                .iter()
                .map(|attr| TxAttribute {
                    key: attr.key.clone(),
                    value: attr.value.clone(),
                })
                .collect(),
        }
    }
}

impl From<&lookout_proto::tendermint::Event> for TxEvent {
    fn from(event: &lookout_proto::tendermint::Event) -> Self {
        Self {
            ty: event.r#type.clone(),
            attributes: event
                .attributes
                .iter()
                .map(|attr| TxAttribute {
                    key: attr.key.clone(),
                    value: attr.value.clone(),
                })
                .collect(),
        }
    }
}

impl From<&cosmwasm_std::Event> for TxEvent {
    fn from(event: &cosmwasm_std::Event) -> Self {
        Self {
            ty: event.ty.clone(),
            attributes: event
                .attributes
                .iter()
                .map(|attr| TxAttribute {
                    key: attr.key.clone(),
                    value: attr.value.clone(),
                })
                .collect(),
        }
    }
}

impl From<TxEvent> for cosmwasm_std::Event {
    fn from(event: TxEvent) -> Self {
        cosmwasm_std::Event::new(event.ty).add_attributes(
            event
                .attributes
                .into_iter()
                .map(|attr| cosmwasm_std::Attribute {
                    key: attr.key,
                    value: attr.value,
                }),
        )
    }
}

/// A bare event list has no message boundaries; treat it as a
/// single-message transaction.
impl From<Vec<cosmwasm_std::Event>> for TxEvents {
    fn from(events: Vec<cosmwasm_std::Event>) -> Self {
        Self::from_message_events(vec![events.iter().map(TxEvent::from).collect()])
    }
}

impl From<&lookout_proto::abci::TxResponse> for TxEvents {
    fn from(resp: &lookout_proto::abci::TxResponse) -> Self {
        if !resp.logs.is_empty() {
            let msg_count = resp
                .logs
                .iter()
                .map(|log| log.msg_index + 1)
                .max()
                .unwrap_or(0);
            let mut msgs = vec![Vec::new(); msg_count as usize];
            for log in &resp.logs {
                msgs[log.msg_index as usize].extend(log.events.iter().map(TxEvent::from));
            }
            Self::from_message_events(msgs)
        } else {
            // newer SDKs drop `logs` entirely; the flat list is partitioned
            // by each event's own msg_index attribute instead. Events
            // without one (fees, tx-level bookkeeping) belong to no message.
            let mut msgs: Vec<Vec<TxEvent>> = Vec::new();
            for event in &resp.events {
                let event = TxEvent::from(event);
                let Some(index) = event
                    .maybe_attr(EVENT_ATTR_MSG_INDEX)
                    .and_then(|value| value.parse::<usize>().ok())
                else {
                    continue;
                };
                if msgs.len() <= index {
                    msgs.resize_with(index + 1, Vec::new);
                }
                msgs[index].push(event);
            }
            Self::from_message_events(msgs)
        }
    }
}
