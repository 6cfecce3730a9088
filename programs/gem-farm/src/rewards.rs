//! Reward accounting for the two reward buckets of a farm.
//!
//! Variable rate buckets spread funded tokens evenly over a duration and split
//! them between farmers pro rata by gems staked, using an accrued-reward-per-gem
//! accumulator. Fixed rate buckets promise every staked gem `base_rate` tokens
//! per second; promises are reserved out of the funded amount when a farmer is
//! enrolled and released when the farmer stops staking.
//!
//! Nothing here touches accounts or the clock: callers pass `now` and the gem
//! counts, which keeps the math testable off-chain.

use anchor_lang::prelude::*;

use crate::error::FarmError;

/// Fixed-point scale of `reward_rate` and `accrued_reward_per_gem`.
pub const PRECISION: u128 = 1_000_000_000_000;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum RewardType {
    #[default]
    Variable,
    Fixed,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableRateConfig {
    pub amount: u64,
    pub duration_sec: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedRateConfig {
    /// Reward tokens per staked gem per second.
    pub base_rate: u64,
    pub amount: u64,
    pub duration_sec: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FundsTracker {
    pub total_funded: u64,
    pub total_accrued_to_stakers: u64,
    /// Fixed rate only: promised to enrolled farmers but not accrued yet.
    pub total_reserved: u64,
}

impl FundsTracker {
    /// Funded tokens that are neither accrued nor reserved.
    pub fn unallocated(&self) -> Result<u64> {
        self.total_funded
            .checked_sub(self.total_accrued_to_stakers)
            .and_then(|left| left.checked_sub(self.total_reserved))
            .ok_or_else(|| error!(FarmError::ArithmeticOverflow))
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct TimeTracker {
    pub duration_sec: u64,
    pub reward_end_ts: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct VariableRateTracker {
    /// Tokens per second, scaled by `PRECISION`.
    pub reward_rate: u128,
    pub reward_last_updated_ts: u64,
    /// Scaled by `PRECISION`.
    pub accrued_reward_per_gem: u128,
    /// Sum of per-gem increments times the gems staked at the time, scaled
    /// by `PRECISION`. Bounds what farmers can have accrued in total.
    pub accrued_to_stakers_scaled: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FixedRateTracker {
    pub base_rate: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FarmReward {
    pub reward_mint: Pubkey,
    pub reward_pot: Pubkey,
    pub reward_type: RewardType,
    pub funds: FundsTracker,
    pub times: TimeTracker,
    pub variable_rate: VariableRateTracker,
    pub fixed_rate: FixedRateTracker,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FarmerVariableRateReward {
    pub last_recorded_accrued_reward_per_gem: u128,
    /// Fraction of a token earned but not credited yet, scaled by `PRECISION`.
    pub accrued_reward_remainder: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FarmerFixedRateReward {
    /// Rate locked in at enrollment.
    pub base_rate: u64,
    pub begin_staking_ts: u64,
    pub last_updated_ts: u64,
    pub promised_duration: u64,
}

impl FarmerFixedRateReward {
    pub fn end_ts(&self) -> Result<u64> {
        self.begin_staking_ts
            .checked_add(self.promised_duration)
            .ok_or_else(|| error!(FarmError::ArithmeticOverflow))
    }

    /// Part of the promise that has not accrued yet.
    pub fn outstanding(&self, gems: u64) -> Result<u64> {
        let remaining = self.end_ts()?.saturating_sub(self.last_updated_ts);
        reward_for(gems, self.base_rate, remaining)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FarmerReward {
    pub paid_out_reward: u64,
    pub accrued_reward: u64,
    pub variable_rate: FarmerVariableRateReward,
    pub fixed_rate: FarmerFixedRateReward,
}

impl FarmerReward {
    pub fn claimable(&self) -> u64 {
        self.accrued_reward.saturating_sub(self.paid_out_reward)
    }

    pub fn record_payout(&mut self, amount: u64) -> Result<()> {
        require!(amount <= self.claimable(), FarmError::InvalidAmount);
        self.paid_out_reward = self
            .paid_out_reward
            .checked_add(amount)
            .ok_or(FarmError::ArithmeticOverflow)?;
        Ok(())
    }
}

fn reward_for(gems: u64, rate: u64, seconds: u64) -> Result<u64> {
    (gems as u128)
        .checked_mul(rate as u128)
        .and_then(|v| v.checked_mul(seconds as u128))
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| error!(FarmError::ArithmeticOverflow))
}

impl FarmReward {
    /// Brings the bucket, and optionally one farmer holding `gems`, up to `now`.
    /// `farm_gems_staked` must be the farm total before any gem count change
    /// made by the calling operation.
    pub fn update_accrued_reward(
        &mut self,
        now: u64,
        farm_gems_staked: u64,
        farmer: Option<(&mut FarmerReward, u64)>,
        reenroll: bool,
    ) -> Result<()> {
        match self.reward_type {
            RewardType::Variable => {
                self.update_variable_rate(now, farm_gems_staked)?;
                if let Some((farmer_reward, gems)) = farmer {
                    self.accrue_variable(farmer_reward, gems)?;
                }
            }
            RewardType::Fixed => {
                if let Some((farmer_reward, gems)) = farmer {
                    self.accrue_fixed(now, farmer_reward, gems)?;
                    if reenroll && gems > 0 {
                        self.release_fixed(farmer_reward, gems)?;
                        self.enroll_fixed(now, farmer_reward, gems)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Starts earning for a farmer that now holds `gems` staked gems.
    /// Accrual must already be up to date.
    pub fn enroll_farmer(&mut self, now: u64, farmer: &mut FarmerReward, gems: u64) -> Result<()> {
        match self.reward_type {
            RewardType::Variable => {
                farmer.variable_rate.last_recorded_accrued_reward_per_gem =
                    self.variable_rate.accrued_reward_per_gem;
                Ok(())
            }
            RewardType::Fixed => self.enroll_fixed(now, farmer, gems),
        }
    }

    /// Stops earning for a farmer that held `gems` staked gems.
    /// Accrual must already be up to date.
    pub fn graduate_farmer(&mut self, farmer: &mut FarmerReward, gems: u64) -> Result<()> {
        match self.reward_type {
            RewardType::Variable => Ok(()),
            RewardType::Fixed => self.release_fixed(farmer, gems),
        }
    }

    pub fn fund(
        &mut self,
        now: u64,
        variable_rate_config: Option<VariableRateConfig>,
        fixed_rate_config: Option<FixedRateConfig>,
    ) -> Result<u64> {
        match (self.reward_type, variable_rate_config, fixed_rate_config) {
            (RewardType::Variable, Some(config), _) => {
                self.fund_variable(now, config)?;
                Ok(config.amount)
            }
            (RewardType::Fixed, _, Some(config)) => {
                self.fund_fixed(now, config)?;
                Ok(config.amount)
            }
            (_, None, None) => err!(FarmError::MissingRewardConfig),
            _ => err!(FarmError::WrongRewardType),
        }
    }

    fn fund_variable(&mut self, now: u64, config: VariableRateConfig) -> Result<()> {
        require!(config.amount > 0, FarmError::InvalidAmount);
        require!(config.duration_sec > 0, FarmError::InvalidRewardDuration);

        // whatever was never accrued (including idle periods) rolls over
        let undistributed = self
            .funds
            .total_funded
            .checked_sub(self.funds.total_accrued_to_stakers)
            .ok_or(FarmError::ArithmeticOverflow)?;
        let to_distribute = undistributed
            .checked_add(config.amount)
            .ok_or(FarmError::ArithmeticOverflow)?;

        self.variable_rate.reward_rate = (to_distribute as u128)
            .checked_mul(PRECISION)
            .ok_or(FarmError::ArithmeticOverflow)?
            / config.duration_sec as u128;
        self.variable_rate.reward_last_updated_ts = now;
        self.times.duration_sec = config.duration_sec;
        self.times.reward_end_ts = now
            .checked_add(config.duration_sec)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.funds.total_funded = self
            .funds
            .total_funded
            .checked_add(config.amount)
            .ok_or(FarmError::ArithmeticOverflow)?;
        Ok(())
    }

    fn fund_fixed(&mut self, now: u64, config: FixedRateConfig) -> Result<()> {
        require!(config.amount > 0, FarmError::InvalidAmount);
        require!(config.duration_sec > 0, FarmError::InvalidRewardDuration);

        self.fixed_rate.base_rate = config.base_rate;
        self.times.duration_sec = config.duration_sec;
        self.times.reward_end_ts = now
            .checked_add(config.duration_sec)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.funds.total_funded = self
            .funds
            .total_funded
            .checked_add(config.amount)
            .ok_or(FarmError::ArithmeticOverflow)?;
        Ok(())
    }

    fn update_variable_rate(&mut self, now: u64, farm_gems_staked: u64) -> Result<()> {
        let tracker = &mut self.variable_rate;
        let until = now.min(self.times.reward_end_ts);
        if until <= tracker.reward_last_updated_ts {
            return Ok(());
        }
        let elapsed = (until - tracker.reward_last_updated_ts) as u128;

        if farm_gems_staked > 0 {
            let per_gem = tracker
                .reward_rate
                .checked_mul(elapsed)
                .ok_or(FarmError::ArithmeticOverflow)?
                / farm_gems_staked as u128;
            tracker.accrued_reward_per_gem = tracker
                .accrued_reward_per_gem
                .checked_add(per_gem)
                .ok_or(FarmError::ArithmeticOverflow)?;
            tracker.accrued_to_stakers_scaled = per_gem
                .checked_mul(farm_gems_staked as u128)
                .and_then(|v| v.checked_add(tracker.accrued_to_stakers_scaled))
                .ok_or(FarmError::ArithmeticOverflow)?;

            // rounded up so no accrued fraction is ever funded twice
            let accrued_tokens = tracker.accrued_to_stakers_scaled.div_ceil(PRECISION);
            self.funds.total_accrued_to_stakers =
                u64::try_from(accrued_tokens).map_err(|_| FarmError::ArithmeticOverflow)?;
        }

        tracker.reward_last_updated_ts = until;
        Ok(())
    }

    fn accrue_variable(&self, farmer: &mut FarmerReward, gems: u64) -> Result<()> {
        let accrued_per_gem = self.variable_rate.accrued_reward_per_gem;
        let delta = accrued_per_gem
            .checked_sub(farmer.variable_rate.last_recorded_accrued_reward_per_gem)
            .ok_or(FarmError::ArithmeticOverflow)?;
        let earned_scaled = (gems as u128)
            .checked_mul(delta)
            .and_then(|v| v.checked_add(farmer.variable_rate.accrued_reward_remainder))
            .ok_or(FarmError::ArithmeticOverflow)?;
        let earned = u64::try_from(earned_scaled / PRECISION)
            .map_err(|_| FarmError::ArithmeticOverflow)?;

        farmer.accrued_reward = farmer
            .accrued_reward
            .checked_add(earned)
            .ok_or(FarmError::ArithmeticOverflow)?;
        farmer.variable_rate.last_recorded_accrued_reward_per_gem = accrued_per_gem;
        farmer.variable_rate.accrued_reward_remainder = earned_scaled % PRECISION;
        Ok(())
    }

    fn enroll_fixed(&mut self, now: u64, farmer: &mut FarmerReward, gems: u64) -> Result<()> {
        let base_rate = self.fixed_rate.base_rate;
        let per_second = (gems as u128) * (base_rate as u128);

        let mut duration = self.times.reward_end_ts.saturating_sub(now);
        if per_second == 0 {
            duration = 0;
        } else {
            // never promise more than is left unallocated
            let affordable = self.funds.unallocated()? as u128 / per_second;
            duration = duration.min(affordable as u64);
        }

        let promised = reward_for(gems, base_rate, duration)?;
        self.funds.total_reserved = self
            .funds
            .total_reserved
            .checked_add(promised)
            .ok_or(FarmError::ArithmeticOverflow)?;

        farmer.fixed_rate = FarmerFixedRateReward {
            base_rate,
            begin_staking_ts: now,
            last_updated_ts: now,
            promised_duration: duration,
        };
        Ok(())
    }

    fn accrue_fixed(&mut self, now: u64, farmer: &mut FarmerReward, gems: u64) -> Result<()> {
        let schedule = &mut farmer.fixed_rate;
        let until = now.min(schedule.end_ts()?);
        if until <= schedule.last_updated_ts {
            return Ok(());
        }
        let earned = reward_for(gems, schedule.base_rate, until - schedule.last_updated_ts)?;
        schedule.last_updated_ts = until;

        farmer.accrued_reward = farmer
            .accrued_reward
            .checked_add(earned)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.funds.total_reserved = self
            .funds
            .total_reserved
            .checked_sub(earned)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.funds.total_accrued_to_stakers = self
            .funds
            .total_accrued_to_stakers
            .checked_add(earned)
            .ok_or(FarmError::ArithmeticOverflow)?;
        Ok(())
    }

    fn release_fixed(&mut self, farmer: &mut FarmerReward, gems: u64) -> Result<()> {
        let outstanding = farmer.fixed_rate.outstanding(gems)?;
        self.funds.total_reserved = self
            .funds
            .total_reserved
            .checked_sub(outstanding)
            .ok_or(FarmError::ArithmeticOverflow)?;
        farmer.fixed_rate = FarmerFixedRateReward::default();
        Ok(())
    }
}
