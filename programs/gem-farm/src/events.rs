use anchor_lang::prelude::*;

use crate::state::{FarmConfig, FarmerState, WhitelistType};

#[event]
pub struct FarmInitialized {
    pub farm: Pubkey,
    pub farm_manager: Pubkey,
    pub bank: Pubkey,
    pub reward_a_mint: Pubkey,
    pub reward_b_mint: Pubkey,
}

#[event]
pub struct FarmConfigUpdated {
    pub farm: Pubkey,
    pub farm_manager: Pubkey,
    pub old_config: FarmConfig,
    pub new_config: FarmConfig,
}

#[event]
pub struct GemDeposited {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub gem_mint: Pubkey,
    pub amount: u64,
    pub gem_count: u64,
    pub flash: bool,
}

#[event]
pub struct GemWithdrawn {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub gem_mint: Pubkey,
    pub amount: u64,
    pub gem_count: u64,
}

#[event]
pub struct FarmerStaked {
    pub farm: Pubkey,
    pub identity: Pubkey,
    pub gems_staked: u64,
    pub min_staking_ends_ts: u64,
}

#[event]
pub struct FarmerUnstaked {
    pub farm: Pubkey,
    pub identity: Pubkey,
    pub state: FarmerState,
    pub fee_lamports: u64,
}

#[event]
pub struct WhitelistUpdated {
    pub bank: Pubkey,
    pub address: Pubkey,
    pub whitelist_type: WhitelistType,
    pub whitelisted: bool,
}

#[event]
pub struct FunderAuthorizationUpdated {
    pub farm: Pubkey,
    pub funder: Pubkey,
    pub authorized: bool,
}

#[event]
pub struct RewardFunded {
    pub farm: Pubkey,
    pub funder: Pubkey,
    pub reward_mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardsClaimed {
    pub farm: Pubkey,
    pub identity: Pubkey,
    pub reward_a_amount: u64,
    pub reward_b_amount: u64,
}

#[event]
pub struct TreasuryPaidOut {
    pub farm: Pubkey,
    pub destination: Pubkey,
    pub lamports: u64,
}
