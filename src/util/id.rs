use ring::rand::{SecureRandom, SystemRandom};
use std::sync::OnceLock;
use crate::error::{AppError, AppResult};

static RNG: OnceLock<SystemRandom> = OnceLock::new();

/// 生成 len 字节的随机数并转为十六进制字符串
pub fn random_hex(len: usize) -> AppResult<String> {
    let rng = RNG.get_or_init(SystemRandom::new);
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf)
        .map_err(|_| AppError::Internal("system RNG unavailable".to_string()))?;
    Ok(hex::encode(buf))
}
