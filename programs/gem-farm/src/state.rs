use anchor_lang::prelude::*;

use crate::error::FarmError;
use crate::rewards::{FarmReward, FarmerReward, FixedRateConfig, VariableRateConfig};

pub const FARM_AUTHORITY_SEED: &[u8] = b"farm_authority";
pub const FARM_TREASURY_SEED: &[u8] = b"treasury";
pub const FARMER_SEED: &[u8] = b"farmer";
pub const VAULT_SEED: &[u8] = b"vault";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
pub const GEM_BOX_SEED: &[u8] = b"gem_box";
pub const REWARD_POT_SEED: &[u8] = b"reward_pot";
pub const WHITELIST_SEED: &[u8] = b"whitelist";
pub const AUTHORIZATION_SEED: &[u8] = b"authorization";

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FarmConfig {
    pub min_staking_period_sec: u64,
    pub cooldown_period_sec: u64,
    pub unstaking_fee_lamp: u64,
}

impl FarmConfig {
    /// The first fee creates the treasury, so a nonzero fee has to cover
    /// its rent-exempt balance.
    pub fn validate(&self, treasury_rent_exempt_minimum: u64) -> Result<()> {
        require!(
            self.unstaking_fee_lamp == 0
                || self.unstaking_fee_lamp >= treasury_rent_exempt_minimum,
            FarmError::InvalidUnstakingFee
        );
        Ok(())
    }
}

#[account]
#[derive(Default, InitSpace)]
pub struct Farm {
    pub farm_manager: Pubkey,
    /// System-owned PDA collecting unstaking fees.
    pub farm_treasury: Pubkey,
    pub farm_treasury_bump: u8,
    /// PDA owning the reward pots.
    pub farm_authority: Pubkey,
    pub farm_authority_bump: u8,
    pub bank: Pubkey,
    pub config: FarmConfig,

    pub farmer_count: u64,
    pub staked_farmer_count: u64,
    pub gems_staked: u64,
    pub authorized_funder_count: u64,

    pub reward_a: FarmReward,
    pub reward_b: FarmReward,
}

impl Farm {
    pub const LEN: usize = 8 + Farm::INIT_SPACE;

    pub fn reward_mut(&mut self, reward_mint: &Pubkey) -> Result<&mut FarmReward> {
        if self.reward_a.reward_mint == *reward_mint {
            Ok(&mut self.reward_a)
        } else if self.reward_b.reward_mint == *reward_mint {
            Ok(&mut self.reward_b)
        } else {
            err!(FarmError::UnknownRewardMint)
        }
    }

    /// Brings both reward buckets, and the farmer if given, up to `now`.
    pub fn update_rewards(
        &mut self,
        now: u64,
        farmer: Option<&mut Farmer>,
        reenroll: bool,
    ) -> Result<()> {
        let farm_gems = self.gems_staked;
        match farmer {
            Some(farmer) => {
                let gems = farmer.gems_staked;
                self.reward_a.update_accrued_reward(
                    now,
                    farm_gems,
                    Some((&mut farmer.reward_a, gems)),
                    reenroll,
                )?;
                self.reward_b.update_accrued_reward(
                    now,
                    farm_gems,
                    Some((&mut farmer.reward_b, gems)),
                    reenroll,
                )?;
            }
            None => {
                self.reward_a.update_accrued_reward(now, farm_gems, None, reenroll)?;
                self.reward_b.update_accrued_reward(now, farm_gems, None, reenroll)?;
            }
        }
        Ok(())
    }

    pub fn fund_reward(
        &mut self,
        now: u64,
        reward_mint: &Pubkey,
        variable_rate_config: Option<VariableRateConfig>,
        fixed_rate_config: Option<FixedRateConfig>,
    ) -> Result<u64> {
        self.update_rewards(now, None, false)?;
        self.reward_mut(reward_mint)?
            .fund(now, variable_rate_config, fixed_rate_config)
    }

    /// Locks the vault and moves its gems into the farm's staked totals.
    pub fn begin_staking(&mut self, now: u64, farmer: &mut Farmer, vault: &mut Vault) -> Result<()> {
        match farmer.state {
            FarmerState::Unstaked => {}
            FarmerState::Staked => return err!(FarmError::FarmerAlreadyStaked),
            FarmerState::PendingCooldown => return err!(FarmError::FarmerInCooldown),
        }
        require!(vault.gem_count > 0, FarmError::NothingToStake);

        self.update_rewards(now, Some(&mut *farmer), false)?;

        vault.lock();
        let gems = vault.gem_count;
        farmer.state = FarmerState::Staked;
        farmer.gems_staked = gems;
        farmer.min_staking_ends_ts = now
            .checked_add(self.config.min_staking_period_sec)
            .ok_or(FarmError::ArithmeticOverflow)?;
        farmer.cooldown_ends_ts = 0;

        self.staked_farmer_count = self
            .staked_farmer_count
            .checked_add(1)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.gems_staked = self
            .gems_staked
            .checked_add(gems)
            .ok_or(FarmError::ArithmeticOverflow)?;

        self.reward_a.enroll_farmer(now, &mut farmer.reward_a, gems)?;
        self.reward_b.enroll_farmer(now, &mut farmer.reward_b, gems)?;
        Ok(())
    }

    /// Advances the farmer one step out of staking and returns the unstaking
    /// fee (in lamports) the farmer owes the treasury for this step.
    ///
    /// Leaving `Staked` charges the fee and either unlocks the vault right away
    /// (zero cooldown) or starts the cooldown. Leaving `PendingCooldown` unlocks
    /// the vault once the cooldown has passed.
    pub fn end_staking(&mut self, now: u64, farmer: &mut Farmer, vault: &mut Vault) -> Result<u64> {
        match farmer.state {
            FarmerState::Unstaked => err!(FarmError::FarmerNotStaked),
            FarmerState::Staked => {
                require!(
                    now >= farmer.min_staking_ends_ts,
                    FarmError::MinStakingNotPassed
                );

                self.update_rewards(now, Some(&mut *farmer), false)?;

                let gems = farmer.gems_staked;
                self.reward_a.graduate_farmer(&mut farmer.reward_a, gems)?;
                self.reward_b.graduate_farmer(&mut farmer.reward_b, gems)?;

                self.staked_farmer_count = self
                    .staked_farmer_count
                    .checked_sub(1)
                    .ok_or(FarmError::ArithmeticOverflow)?;
                self.gems_staked = self
                    .gems_staked
                    .checked_sub(gems)
                    .ok_or(FarmError::ArithmeticOverflow)?;

                farmer.gems_staked = 0;
                farmer.cooldown_ends_ts = now
                    .checked_add(self.config.cooldown_period_sec)
                    .ok_or(FarmError::ArithmeticOverflow)?;
                if self.config.cooldown_period_sec == 0 {
                    farmer.state = FarmerState::Unstaked;
                    vault.unlock();
                } else {
                    farmer.state = FarmerState::PendingCooldown;
                }

                Ok(self.config.unstaking_fee_lamp)
            }
            FarmerState::PendingCooldown => {
                require!(now >= farmer.cooldown_ends_ts, FarmError::CooldownNotPassed);
                farmer.state = FarmerState::Unstaked;
                vault.unlock();
                Ok(0)
            }
        }
    }

    /// Adds gems to a staked farmer's locked vault and restarts the farmer's
    /// staking window.
    pub fn record_flash_deposit(
        &mut self,
        now: u64,
        farmer: &mut Farmer,
        vault: &mut Vault,
        amount: u64,
    ) -> Result<()> {
        require!(amount > 0, FarmError::InvalidAmount);
        require!(
            farmer.state == FarmerState::Staked,
            FarmError::FarmerNotStaked
        );

        self.update_rewards(now, Some(&mut *farmer), false)?;

        let old_gems = farmer.gems_staked;
        self.reward_a.graduate_farmer(&mut farmer.reward_a, old_gems)?;
        self.reward_b.graduate_farmer(&mut farmer.reward_b, old_gems)?;

        vault.record_deposit(amount, DepositKind::Flash)?;
        farmer.gems_staked = old_gems
            .checked_add(amount)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.gems_staked = self
            .gems_staked
            .checked_add(amount)
            .ok_or(FarmError::ArithmeticOverflow)?;

        let new_gems = farmer.gems_staked;
        self.reward_a.enroll_farmer(now, &mut farmer.reward_a, new_gems)?;
        self.reward_b.enroll_farmer(now, &mut farmer.reward_b, new_gems)?;

        farmer.reset_staking_window(now, self.config.min_staking_period_sec)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum FarmerState {
    #[default]
    Unstaked,
    Staked,
    PendingCooldown,
}

#[account]
#[derive(Default, InitSpace)]
pub struct Farmer {
    pub farm: Pubkey,
    pub identity: Pubkey,
    pub vault: Pubkey,
    pub bump: u8,
    pub state: FarmerState,
    pub gems_staked: u64,
    pub min_staking_ends_ts: u64,
    pub cooldown_ends_ts: u64,
    pub reward_a: FarmerReward,
    pub reward_b: FarmerReward,
}

impl Farmer {
    pub const LEN: usize = 8 + Farmer::INIT_SPACE;

    /// Pushes the end of the minimum staking period out to
    /// `now + min_staking_period_sec`; never moves it backwards.
    pub fn reset_staking_window(&mut self, now: u64, min_staking_period_sec: u64) -> Result<()> {
        let ends_ts = now
            .checked_add(min_staking_period_sec)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.min_staking_ends_ts = self.min_staking_ends_ts.max(ends_ts);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepositKind {
    Plain,
    /// Deposit into a staked vault that refreshes the farmer in the same instruction.
    Flash,
}

#[account]
#[derive(Default, InitSpace)]
pub struct Vault {
    pub bank: Pubkey,
    pub owner: Pubkey,
    pub bump: u8,
    pub authority_bump: u8,
    pub locked: bool,
    pub gem_count: u64,
}

impl Vault {
    pub const LEN: usize = 8 + Vault::INIT_SPACE;

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn record_deposit(&mut self, amount: u64, kind: DepositKind) -> Result<()> {
        require!(amount > 0, FarmError::InvalidAmount);
        require!(
            !self.locked || kind == DepositKind::Flash,
            FarmError::VaultLocked
        );
        self.gem_count = self
            .gem_count
            .checked_add(amount)
            .ok_or(FarmError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn record_withdrawal(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, FarmError::InvalidAmount);
        require!(!self.locked, FarmError::VaultLocked);
        self.gem_count = self
            .gem_count
            .checked_sub(amount)
            .ok_or(FarmError::InsufficientGems)?;
        Ok(())
    }
}

#[account]
#[derive(Default, InitSpace)]
pub struct Bank {
    pub farm: Pubkey,
    pub vault_count: u64,
    pub whitelisted_creators: u32,
    pub whitelisted_mints: u32,
}

impl Bank {
    pub const LEN: usize = 8 + Bank::INIT_SPACE;

    pub fn requires_whitelist(&self) -> bool {
        self.whitelisted_creators > 0 || self.whitelisted_mints > 0
    }

    pub fn record_whitelisted(&mut self, whitelist_type: WhitelistType) -> Result<()> {
        let counter = match whitelist_type {
            WhitelistType::Creator => &mut self.whitelisted_creators,
            WhitelistType::Mint => &mut self.whitelisted_mints,
        };
        *counter = counter.checked_add(1).ok_or(FarmError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn record_unwhitelisted(&mut self, whitelist_type: WhitelistType) -> Result<()> {
        let counter = match whitelist_type {
            WhitelistType::Creator => &mut self.whitelisted_creators,
            WhitelistType::Mint => &mut self.whitelisted_mints,
        };
        *counter = counter.checked_sub(1).ok_or(FarmError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Admits a gem when the bank has no whitelist, when the mint is
    /// whitelisted, or when one of the gem's verified creators is.
    pub fn admit_gem(
        &self,
        bank: &Pubkey,
        gem_mint: &Pubkey,
        mint_proof: Option<&WhitelistProof>,
        creator_proof: Option<&WhitelistProof>,
        verified_creators: &[Pubkey],
    ) -> Result<()> {
        if !self.requires_whitelist() {
            return Ok(());
        }
        if mint_proof.is_some_and(|proof| proof.admits(bank, gem_mint, WhitelistType::Mint)) {
            return Ok(());
        }
        if let Some(proof) = creator_proof {
            if verified_creators
                .iter()
                .any(|creator| proof.admits(bank, creator, WhitelistType::Creator))
            {
                return Ok(());
            }
        }
        err!(FarmError::NotWhitelisted)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum WhitelistType {
    #[default]
    Creator,
    Mint,
}

#[account]
#[derive(Default, InitSpace)]
pub struct WhitelistProof {
    pub whitelisted_address: Pubkey,
    pub bank: Pubkey,
    pub whitelist_type: WhitelistType,
    pub bump: u8,
}

impl WhitelistProof {
    pub const LEN: usize = 8 + WhitelistProof::INIT_SPACE;

    pub fn admits(&self, bank: &Pubkey, address: &Pubkey, whitelist_type: WhitelistType) -> bool {
        self.bank == *bank
            && self.whitelisted_address == *address
            && self.whitelist_type == whitelist_type
    }
}

// existence = funder may fund this farm's rewards
#[account]
#[derive(Default, InitSpace)]
pub struct AuthorizationProof {
    pub authorized_funder: Pubkey,
    pub farm: Pubkey,
    pub bump: u8,
}

impl AuthorizationProof {
    pub const LEN: usize = 8 + AuthorizationProof::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.farm != Pubkey::default()
    }
}

pub fn check_treasury_payout(treasury_balance: u64, lamports: u64) -> Result<()> {
    require!(lamports > 0, FarmError::InvalidAmount);
    require!(
        lamports <= treasury_balance,
        FarmError::InsufficientTreasuryBalance
    );
    Ok(())
}
