//! 抽样服务 - 业务能力层
//!
//! 在全量下载前随机抽取若干投票桌做试探

use crate::models::mesa::JoinedMesa;
use rand::seq::SliceRandom;
use rand::Rng;

/// 无放回随机抽取 `min(size, mesas.len())` 个投票桌
pub fn pick_sample<R: Rng + ?Sized>(mesas: &[JoinedMesa], size: usize, rng: &mut R) -> Vec<JoinedMesa> {
    mesas
        .choose_multiple(rng, size.min(mesas.len()))
        .cloned()
        .collect()
}
