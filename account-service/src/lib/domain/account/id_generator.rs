use std::sync::Mutex;
use std::sync::PoisonError;

use chrono::Utc;

use crate::domain::account::errors::IdGeneratorError;
use crate::domain::account::models::AccountId;

/// Custom epoch in milliseconds (2010-11-04T01:42:54.657Z).
const EPOCH_MILLIS: i64 = 1_288_834_974_657;

const NODE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;

const MAX_NODE_ID: u16 = (1 << NODE_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

const NODE_SHIFT: u32 = SEQUENCE_BITS;
const TIMESTAMP_SHIFT: u32 = NODE_BITS + SEQUENCE_BITS;

/// Snowflake-style account identifier generator.
///
/// Layout (most significant first): 1 sign bit (always 0), 41 bits of
/// milliseconds since [`EPOCH_MILLIS`], 10 bits node id, 12 bits sequence.
/// Ids from one generator are strictly increasing; generators with distinct
/// node ids never collide.
pub struct AccountIdGenerator {
    node_id: u16,
    state: Mutex<GeneratorState>,
}

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp: i64,
    sequence: i64,
}

impl AccountIdGenerator {
    /// Create a generator for one node of the id space.
    ///
    /// # Arguments
    /// * `node_id` - Partition of the id space owned by this instance (0-1023)
    ///
    /// # Errors
    /// * `NodeIdOutOfRange` - Node id does not fit in 10 bits
    pub fn new(node_id: u16) -> Result<Self, IdGeneratorError> {
        if node_id > MAX_NODE_ID {
            return Err(IdGeneratorError::NodeIdOutOfRange {
                max: MAX_NODE_ID,
                actual: node_id,
            });
        }

        Ok(Self {
            node_id,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    /// Generate the next identifier.
    ///
    /// When the sequence of the current millisecond is exhausted the call
    /// waits for the clock to reach the next millisecond.
    pub fn generate(&self) -> AccountId {
        self.generate_with(|| Utc::now().timestamp_millis() - EPOCH_MILLIS)
    }

    fn generate_with(&self, mut clock: impl FnMut() -> i64) -> AccountId {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        // Never go back in time, even if the wall clock does.
        let mut timestamp = clock().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                while timestamp <= state.last_timestamp {
                    std::hint::spin_loop();
                    timestamp = clock();
                }
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = timestamp;

        AccountId(
            (timestamp << TIMESTAMP_SHIFT)
                | (i64::from(self.node_id) << NODE_SHIFT)
                | state.sequence,
        )
    }
}
