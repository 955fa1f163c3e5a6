//! Relay plumbing: global object ids and keyset cursors.
//!
//! A global id is base64 of `"<Type>:<pk>"`, a cursor is base64 of
//! `"cursor:<pk>"`. Both are opaque to clients.

use async_graphql::ID;
use async_graphql::connection::{Connection, CursorType, Edge};
use async_graphql::{OutputType, SimpleObject};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{BlogError, Result};
use crate::storage::{Page, PageRequest};

const CURSOR_PREFIX: &str = "cursor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    User,
    Post,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::User => "User",
            NodeType::Post => "Post",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "User" => Some(NodeType::User),
            "Post" => Some(NodeType::Post),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalId {
    pub node_type: NodeType,
    pub id: i64,
}

impl GlobalId {
    pub fn new(node_type: NodeType, id: i64) -> Self {
        Self { node_type, id }
    }

    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.node_type.as_str(), self.id))
    }

    pub fn decode(s: &str) -> Result<Self> {
        let invalid = || BlogError::InvalidId(s.to_string());
        let raw = decode_text(s).ok_or_else(invalid)?;
        let (type_name, pk) = raw.split_once(':').ok_or_else(invalid)?;
        let node_type = NodeType::parse(type_name).ok_or_else(invalid)?;
        let id = pk.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self { node_type, id })
    }
}

impl From<GlobalId> for ID {
    fn from(id: GlobalId) -> Self {
        ID::from(id.encode())
    }
}

fn decode_text(s: &str) -> Option<String> {
    let bytes = STANDARD.decode(s).ok()?;
    String::from_utf8(bytes).ok()
}

/// Cursor naming the primary key of the edge it marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCursor(pub i64);

impl CursorType for RowCursor {
    type Error = BlogError;

    fn decode_cursor(s: &str) -> std::result::Result<Self, Self::Error> {
        let invalid = || BlogError::InvalidId(format!("cursor {}", s));
        let raw = decode_text(s).ok_or_else(invalid)?;
        match raw.split_once(':') {
            Some((CURSOR_PREFIX, pk)) => pk.parse().map(RowCursor).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    fn encode_cursor(&self) -> String {
        STANDARD.encode(format!("{}:{}", CURSOR_PREFIX, self.0))
    }
}

/// Extra fields carried by every connection.
#[derive(SimpleObject)]
pub struct ConnectionFields {
    /// Number of rows in the whole list, not just this page
    pub total_count: i64,
}

pub type RowConnection<N> = Connection<RowCursor, N, ConnectionFields>;

pub fn page_request(
    after: Option<RowCursor>,
    before: Option<RowCursor>,
    first: Option<usize>,
    last: Option<usize>,
) -> PageRequest {
    PageRequest {
        after: after.map(|c| c.0),
        before: before.map(|c| c.0),
        first,
        last,
    }
}

/// Turn a storage page into a connection, keyed by `key`.
pub fn into_connection<M, N>(
    page: Page<M>,
    total_count: i64,
    key: impl Fn(&M) -> i64,
) -> RowConnection<N>
where
    N: From<M> + OutputType,
{
    let mut connection = Connection::with_additional_fields(
        page.has_previous_page,
        page.has_next_page,
        ConnectionFields { total_count },
    );
    connection.edges.extend(
        page.items
            .into_iter()
            .map(|item| Edge::new(RowCursor(key(&item)), N::from(item))),
    );
    connection
}
