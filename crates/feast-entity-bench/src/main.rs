//! Benchmark for entity decoding using a registry JSON dump.
//!
//! Loads entities in the registry's JSON form (or synthesizes a mixed
//! legacy/multi-key catalog), encodes them to protobuf envelopes, and decodes
//! the batch sequentially and across threads.

use std::collections::BTreeMap;
use std::fs;
use std::num::NonZeroUsize;
use std::thread;
use std::time::{Duration, Instant};

use feast_entity::{
    decode_entity_bytes, DecodeError, Entity, EntityProto, EntitySpecV2, JoinKeySpec, ValueType,
};
use prost::Message;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SYNTHETIC_ENTITIES: usize = 100_000;
const DECODE_ITERS: u32 = 5;

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct EntityJson {
    spec: SpecJson,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SpecJson {
    name: String,
    project: String,
    value_type: Option<ValueTypeJson>,
    join_key: String,
    join_keys: BTreeMap<String, JoinKeyJson>,
    description: String,
    tags: BTreeMap<String, String>,
    owner: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct JoinKeyJson {
    name: String,
    value_type: Option<ValueTypeJson>,
    description: String,
}

/// Enum fields as protobuf JSON writes them: the registry name, or the wire
/// number when the dump was produced with integer enums.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValueTypeJson {
    Number(i32),
    Name(String),
}

/// Maps a JSON enum value to its wire number. Unknown names keep an
/// out-of-range number so the decoder reports them.
fn wire_value_type(value: Option<&ValueTypeJson>) -> i32 {
    match value {
        None => ValueType::Unspecified.into(),
        Some(ValueTypeJson::Number(number)) => *number,
        Some(ValueTypeJson::Name(name)) => ValueType::from_str_name(name).map_or(-1, i32::from),
    }
}

impl From<EntityJson> for EntityProto {
    fn from(json: EntityJson) -> Self {
        let spec = json.spec;
        let join_keys = spec
            .join_keys
            .into_iter()
            .map(|(key, entry)| {
                let entry = JoinKeySpec {
                    name: entry.name,
                    value_type: wire_value_type(entry.value_type.as_ref()),
                    description: entry.description,
                };
                (key, entry)
            })
            .collect();

        EntityProto {
            spec: Some(EntitySpecV2 {
                name: spec.name,
                value_type: wire_value_type(spec.value_type.as_ref()),
                description: spec.description,
                join_key: spec.join_key,
                tags: spec.tags,
                project: spec.project,
                owner: spec.owner,
                join_keys,
            }),
            meta: None,
        }
    }
}

// =============================================================================
// SYNTHETIC CATALOG
// =============================================================================

/// Every seventh entity is legacy-only, every eleventh has no join key at
/// all, and the rest carry two or three typed keys plus a stale legacy pair.
fn synthesize(count: usize) -> Vec<EntityProto> {
    const TYPES: [ValueType; 4] = [
        ValueType::Int64,
        ValueType::String,
        ValueType::Int32,
        ValueType::Bytes,
    ];

    (0..count)
        .map(|i| {
            let name = format!("entity_{i}");
            let spec = if i % 11 == 0 {
                EntitySpecV2::legacy(name, "", ValueType::Int64)
            } else if i % 7 == 0 {
                EntitySpecV2::legacy(name, format!("entity_{i}_id"), TYPES[i % TYPES.len()])
            } else {
                let keys = (0..2 + i % 2).map(|k| (format!("key_{k}"), TYPES[(i + k) % TYPES.len()]));
                let mut spec = EntitySpecV2::with_join_keys(name, keys);
                spec.join_key = "key_legacy".to_string();
                spec.value_type = ValueType::String.into();
                spec
            };
            EntityProto {
                spec: Some(spec),
                meta: None,
            }
        })
        .collect()
}

// =============================================================================
// DECODING
// =============================================================================

fn decode_batch(encoded: &[Vec<u8>]) -> Vec<Result<Entity, DecodeError>> {
    encoded.iter().map(|bytes| decode_entity_bytes(bytes)).collect()
}

fn decode_parallel(encoded: &[Vec<u8>], workers: usize) -> Vec<Result<Entity, DecodeError>> {
    let chunk_size = encoded.len().div_ceil(workers).max(1);
    thread::scope(|scope| {
        let handles: Vec<_> = encoded
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || decode_batch(chunk)))
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("decode worker panicked"))
            .collect()
    })
}

fn time_avg<T>(mut f: impl FnMut() -> T) -> (T, Duration) {
    let _ = f();
    let start = Instant::now();
    let mut last = None;
    for _ in 0..DECODE_ITERS {
        last = Some(f());
    }
    let elapsed = start.elapsed() / DECODE_ITERS;
    (last.expect("DECODE_ITERS is non-zero"), elapsed)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let protos: Vec<EntityProto> = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading entities");
            let json_data = fs::read_to_string(&path).expect("Failed to read entity dump");
            let parse_start = Instant::now();
            let entities: Vec<EntityJson> =
                serde_json::from_str(&json_data).expect("Failed to parse JSON");
            info!(count = entities.len(), elapsed = ?parse_start.elapsed(), "parsed JSON");
            entities.into_iter().map(EntityProto::from).collect()
        }
        None => {
            info!(count = SYNTHETIC_ENTITIES, "synthesizing entities");
            synthesize(SYNTHETIC_ENTITIES)
        }
    };

    let encode_start = Instant::now();
    let encoded: Vec<Vec<u8>> = protos.iter().map(Message::encode_to_vec).collect();
    let encode_time = encode_start.elapsed();
    let total_bytes: usize = encoded.iter().map(Vec::len).sum();

    println!("Entities: {}", encoded.len());
    println!(
        "Encoded: {} bytes ({:.1} avg) in {:?}",
        total_bytes,
        total_bytes as f64 / encoded.len().max(1) as f64,
        encode_time
    );

    let (sequential, sequential_time) = time_avg(|| decode_batch(&encoded));
    println!(
        "\nDecode (sequential): {:?} (avg of {} iterations)",
        sequential_time, DECODE_ITERS
    );
    println!(
        "  Throughput: {:.0} entities/s",
        encoded.len() as f64 / sequential_time.as_secs_f64()
    );

    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let (parallel, parallel_time) = time_avg(|| decode_parallel(&encoded, workers));
    println!(
        "\nDecode ({} threads): {:?} (avg of {} iterations)",
        workers, parallel_time, DECODE_ITERS
    );
    println!(
        "  Throughput: {:.0} entities/s",
        encoded.len() as f64 / parallel_time.as_secs_f64()
    );
    println!(
        "  Speedup: {:.1}x",
        sequential_time.as_secs_f64() / parallel_time.as_secs_f64()
    );

    assert_eq!(
        sequential, parallel,
        "Parallel decoding should match sequential decoding"
    );

    let mut single_key = 0;
    let mut multi_key = 0;
    let mut invalid = 0;
    for result in &sequential {
        match result {
            Ok(entity) if entity.join_keys().len() > 1 => multi_key += 1,
            Ok(_) => single_key += 1,
            Err(err) => {
                invalid += 1;
                if invalid <= 5 {
                    warn!(code = err.code().code(), "{err}");
                }
            }
        }
    }

    println!("\n=== Summary ===");
    println!("Single join key: {}", single_key);
    println!("Multiple join keys: {}", multi_key);
    println!("Invalid: {}", invalid);
}

#[cfg(test)]
mod tests {
    use feast_entity::{decode_entity, InvalidReason};

    use super::*;

    fn parse(json: &str) -> Vec<EntityProto> {
        serde_json::from_str::<Vec<EntityJson>>(json)
            .unwrap()
            .into_iter()
            .map(EntityProto::from)
            .collect()
    }

    #[test]
    fn test_integer_and_named_value_types() {
        let protos = parse(
            r#"[
                {"spec": {"name": "driver", "joinKey": "driver_id", "valueType": 4}},
                {"spec": {"name": "rider", "joinKey": "rider_id", "valueType": "STRING"}},
                {"spec": {"name": "trip", "project": "rides",
                          "joinKeys": {"trip_id": {"name": "trip_id", "valueType": 2}}}}
            ]"#,
        );

        let driver = decode_entity(&protos[0]).unwrap();
        assert_eq!(driver.join_key_value_type("driver_id"), Some(ValueType::Int64));

        let rider = decode_entity(&protos[1]).unwrap();
        assert_eq!(rider.join_key_value_type("rider_id"), Some(ValueType::String));

        let trip = decode_entity(&protos[2]).unwrap();
        assert_eq!(trip.project(), "rides");
        assert_eq!(trip.join_key_value_type("trip_id"), Some(ValueType::String));
    }

    #[test]
    fn test_unknown_value_type_name_is_reported() {
        let protos = parse(r#"[{"spec": {"name": "driver", "joinKey": "driver_id", "valueType": "DECIMAL"}}]"#);
        let err = decode_entity(&protos[0]).unwrap_err();
        assert!(matches!(err.reason, InvalidReason::UnknownValueType { value: -1, .. }));
    }
}
