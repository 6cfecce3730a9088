pub mod account_structs;
/// # gem farm - NFT Staking and Reward Accounting
///
/// ## Business Process Flow
///
/// 1. Farm Setup:
///    - Manager creates a farm together with its gem bank
///    - Manager picks two reward mints, each paid out at a variable or fixed rate
///    - Manager sets the minimum staking period, cooldown and unstaking fee
///    - Manager optionally whitelists gem mints or verified creators on the bank
///
/// 2. Funding Flow:
///    - Manager authorizes funders for the farm
///    - Funders move reward tokens into the farm's reward pots
///    - Variable rewards are spread over all staked gems for a duration
///    - Fixed rewards are reserved per farmer at a promised rate
///
/// 3. Farmer Flow:
///    a. Deposit Phase:
///       - Farmer opens a farmer account and a personal vault
///       - Farmer deposits gems into the vault while it is unlocked
///
///    b. Staking:
///       - Staking locks the vault and starts accruing rewards
///       - Flash deposits add gems to a staked vault and restart the minimum period
///       - Anyone may refresh a farmer; the farmer may also reenroll fixed rewards
///
///    c. Leaving:
///       - First unstake ends accrual and starts the cooldown (fee charged here)
///       - Second unstake after the cooldown unlocks the vault
///       - Rewards can be claimed at any time
///
/// 4. Administrative Functions:
///    - Update farm configuration or hand the farm to a new manager
///    - Pay collected unstaking fees out of the farm treasury
///
/// Every token account and record the farm owns is a PDA, so the farm
/// authority signs all payouts and each instruction is atomic per transaction.
pub mod error;
pub mod events;
pub mod processor;
pub mod rewards;
pub mod state;

use account_structs::*;
use anchor_lang::prelude::*;
use rewards::{FixedRateConfig, RewardType, VariableRateConfig};
use state::{FarmConfig, WhitelistType};

declare_id!("BXdLcNcVbFHTfumox1qnz85YhVgw36t9CsQFtdQdTGLt");

#[program]
pub mod gem_farm {
    use super::*;

    /// Creates a farm and its bank:
    /// - reward_type_a / reward_type_b: Variable or Fixed payout for each reward mint
    /// - farm_config: staking period, cooldown and unstaking fee
    pub fn init_farm(
        ctx: Context<InitFarm>,
        reward_type_a: RewardType,
        reward_type_b: RewardType,
        farm_config: FarmConfig,
    ) -> Result<()> {
        processor::init_farm(ctx, reward_type_a, reward_type_b, farm_config)
    }

    /// Replaces the farm config and/or the farm manager.
    pub fn update_farm(
        ctx: Context<UpdateFarm>,
        config: Option<FarmConfig>,
        manager: Option<Pubkey>,
    ) -> Result<()> {
        processor::update_farm(ctx, config, manager)
    }

    /// Sends collected unstaking fees to any destination.
    pub fn payout_from_treasury(ctx: Context<TreasuryPayout>, lamports: u64) -> Result<()> {
        processor::payout_from_treasury(ctx, lamports)
    }

    pub fn add_to_bank_whitelist(
        ctx: Context<AddToBankWhitelist>,
        whitelist_type: WhitelistType,
    ) -> Result<()> {
        processor::add_to_bank_whitelist(ctx, whitelist_type)
    }

    pub fn remove_from_bank_whitelist(ctx: Context<RemoveFromBankWhitelist>) -> Result<()> {
        processor::remove_from_bank_whitelist(ctx)
    }

    /// Authorizes a funder. Authorizing an existing funder is a no-op.
    pub fn authorize_funder(ctx: Context<AuthorizeFunder>) -> Result<()> {
        processor::authorize_funder(ctx)
    }

    pub fn deauthorize_funder(ctx: Context<DeauthorizeFunder>) -> Result<()> {
        processor::deauthorize_funder(ctx)
    }

    /// Tops up one reward bucket. Exactly one config matching the bucket's
    /// reward type must be given.
    pub fn fund_reward(
        ctx: Context<FundReward>,
        variable_rate_config: Option<VariableRateConfig>,
        fixed_rate_config: Option<FixedRateConfig>,
    ) -> Result<()> {
        processor::fund_reward(ctx, variable_rate_config, fixed_rate_config)
    }

    pub fn init_farmer(ctx: Context<InitFarmer>) -> Result<()> {
        processor::init_farmer(ctx)
    }

    pub fn deposit_gem(ctx: Context<DepositGem>, amount: u64) -> Result<()> {
        processor::deposit_gem(ctx, amount)
    }

    pub fn withdraw_gem(ctx: Context<WithdrawGem>, amount: u64) -> Result<()> {
        processor::withdraw_gem(ctx, amount)
    }

    /// Locks the farmer's vault and starts accruing rewards on its gems.
    pub fn stake(ctx: Context<Stake>) -> Result<()> {
        processor::stake(ctx)
    }

    /// Moves a staked farmer into cooldown, or a cooled down farmer out of the farm:
    /// - first call requires the minimum staking period to have passed
    /// - second call requires the cooldown to have passed
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        processor::unstake(ctx)
    }

    /// Deposits more gems into a vault that is already staked.
    pub fn flash_deposit(ctx: Context<FlashDeposit>, amount: u64) -> Result<()> {
        processor::flash_deposit(ctx, amount)
    }

    /// Brings a farmer's accrued rewards up to date. Anyone can call this.
    pub fn refresh_farmer(ctx: Context<RefreshFarmer>) -> Result<()> {
        processor::refresh_farmer(ctx)
    }

    /// Same as refresh_farmer, signed by the farmer so it may also reenroll
    /// an expired fixed rate schedule.
    pub fn refresh_farmer_signed(ctx: Context<RefreshFarmerSigned>, reenroll: bool) -> Result<()> {
        processor::refresh_farmer_signed(ctx, reenroll)
    }

    /// Pays out everything claimable in both reward mints.
    pub fn claim(ctx: Context<ClaimRewards>) -> Result<()> {
        processor::claim(ctx)
    }
}
