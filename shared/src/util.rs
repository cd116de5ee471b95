/// 当前 UTC 毫秒时间戳
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Snowflake-style i64 resource id.
///
/// 53 bits so the value survives a round trip through JavaScript's
/// Number type:
///   - high 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - low 12 bits: random, 4096 values per millisecond
///
/// The HR backend assigns ids this way; the mock backend mirrors it so
/// ids stay interchangeable in tests.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // 自定义纪元 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let elapsed = (now_millis() - EPOCH_MS) & ((1 << 41) - 1);
    let noise: i64 = rand::thread_rng().gen_range(0..1 << 12);
    (elapsed << 12) | noise
}
