use crate::account_structs::*;
use crate::error::*;
use crate::events::*;
use crate::rewards::{FarmReward, FixedRateConfig, RewardType, VariableRateConfig};
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::metadata::MetadataAccount;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

fn now_ts() -> Result<u64> {
    u64::try_from(Clock::get()?.unix_timestamp).map_err(|_| error!(FarmError::InvalidTimestamp))
}

// --------------------------------------- farm management

pub fn init_farm(
    ctx: Context<InitFarm>,
    reward_type_a: RewardType,
    reward_type_b: RewardType,
    farm_config: FarmConfig,
) -> Result<()> {
    farm_config.validate(Rent::get()?.minimum_balance(0))?;

    let farm_key = ctx.accounts.farm.key();
    let bank_key = ctx.accounts.bank.key();
    let reward_a_mint = ctx.accounts.reward_a_mint.key();
    let reward_b_mint = ctx.accounts.reward_b_mint.key();

    ctx.accounts.bank.farm = farm_key;
    ctx.accounts.farm.set_inner(Farm {
        farm_manager: ctx.accounts.farm_manager.key(),
        farm_treasury: ctx.accounts.farm_treasury.key(),
        farm_treasury_bump: ctx.bumps.farm_treasury,
        farm_authority: ctx.accounts.farm_authority.key(),
        farm_authority_bump: ctx.bumps.farm_authority,
        bank: bank_key,
        config: farm_config,
        reward_a: FarmReward {
            reward_mint: reward_a_mint,
            reward_pot: ctx.accounts.reward_a_pot.key(),
            reward_type: reward_type_a,
            ..Default::default()
        },
        reward_b: FarmReward {
            reward_mint: reward_b_mint,
            reward_pot: ctx.accounts.reward_b_pot.key(),
            reward_type: reward_type_b,
            ..Default::default()
        },
        ..Default::default()
    });

    emit!(FarmInitialized {
        farm: farm_key,
        farm_manager: ctx.accounts.farm_manager.key(),
        bank: bank_key,
        reward_a_mint,
        reward_b_mint,
    });

    Ok(())
}

pub fn update_farm(
    ctx: Context<UpdateFarm>,
    config: Option<FarmConfig>,
    manager: Option<Pubkey>,
) -> Result<()> {
    let farm_key = ctx.accounts.farm.key();
    let farm = &mut ctx.accounts.farm;

    // staked farmers keep the windows they were given
    if let Some(config) = config {
        config.validate(Rent::get()?.minimum_balance(0))?;
        let old_config = farm.config;
        farm.config = config;

        emit!(FarmConfigUpdated {
            farm: farm_key,
            farm_manager: ctx.accounts.farm_manager.key(),
            old_config,
            new_config: config,
        });
    }

    if let Some(manager) = manager {
        farm.farm_manager = manager;
        msg!("Farm manager changed to {}", manager);
    }

    Ok(())
}

pub fn payout_from_treasury(ctx: Context<TreasuryPayout>, lamports: u64) -> Result<()> {
    check_treasury_payout(ctx.accounts.farm_treasury.lamports(), lamports)?;

    let farm_key = ctx.accounts.farm.key();
    let bump = ctx.accounts.farm.farm_treasury_bump;
    let seeds: &[&[u8]] = &[FARM_TREASURY_SEED, farm_key.as_ref(), &[bump]];
    let signer = &[&seeds[..]];
    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.farm_treasury.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
            },
            signer,
        ),
        lamports,
    )?;

    emit!(TreasuryPaidOut {
        farm: farm_key,
        destination: ctx.accounts.destination.key(),
        lamports,
    });

    Ok(())
}

// --------------------------------------- bank whitelist

pub fn add_to_bank_whitelist(
    ctx: Context<AddToBankWhitelist>,
    whitelist_type: WhitelistType,
) -> Result<()> {
    let address = ctx.accounts.address_to_whitelist.key();
    let bank_key = ctx.accounts.bank.key();

    ctx.accounts.whitelist_proof.set_inner(WhitelistProof {
        whitelisted_address: address,
        bank: bank_key,
        whitelist_type,
        bump: ctx.bumps.whitelist_proof,
    });
    ctx.accounts.bank.record_whitelisted(whitelist_type)?;

    emit!(WhitelistUpdated {
        bank: bank_key,
        address,
        whitelist_type,
        whitelisted: true,
    });

    Ok(())
}

pub fn remove_from_bank_whitelist(ctx: Context<RemoveFromBankWhitelist>) -> Result<()> {
    let whitelist_type = ctx.accounts.whitelist_proof.whitelist_type;
    ctx.accounts.bank.record_unwhitelisted(whitelist_type)?;

    emit!(WhitelistUpdated {
        bank: ctx.accounts.bank.key(),
        address: ctx.accounts.address_to_remove.key(),
        whitelist_type,
        whitelisted: false,
    });

    Ok(())
}

// --------------------------------------- funders

pub fn authorize_funder(ctx: Context<AuthorizeFunder>) -> Result<()> {
    let farm_key = ctx.accounts.farm.key();
    let funder = ctx.accounts.funder_to_authorize.key();

    let proof = &mut ctx.accounts.authorization_proof;
    if proof.is_initialized() {
        msg!("Funder {} is already authorized", funder);
        return Ok(());
    }
    proof.set_inner(AuthorizationProof {
        authorized_funder: funder,
        farm: farm_key,
        bump: ctx.bumps.authorization_proof,
    });

    let farm = &mut ctx.accounts.farm;
    farm.authorized_funder_count = farm
        .authorized_funder_count
        .checked_add(1)
        .ok_or(FarmError::ArithmeticOverflow)?;

    emit!(FunderAuthorizationUpdated {
        farm: farm_key,
        funder,
        authorized: true,
    });

    Ok(())
}

pub fn deauthorize_funder(ctx: Context<DeauthorizeFunder>) -> Result<()> {
    let farm_key = ctx.accounts.farm.key();
    let farm = &mut ctx.accounts.farm;
    farm.authorized_funder_count = farm
        .authorized_funder_count
        .checked_sub(1)
        .ok_or(FarmError::ArithmeticOverflow)?;

    emit!(FunderAuthorizationUpdated {
        farm: farm_key,
        funder: ctx.accounts.funder_to_deauthorize.key(),
        authorized: false,
    });

    Ok(())
}

pub fn fund_reward(
    ctx: Context<FundReward>,
    variable_rate_config: Option<VariableRateConfig>,
    fixed_rate_config: Option<FixedRateConfig>,
) -> Result<()> {
    let now = now_ts()?;
    let reward_mint = ctx.accounts.reward_mint.key();
    let amount = ctx.accounts.farm.fund_reward(
        now,
        &reward_mint,
        variable_rate_config,
        fixed_rate_config,
    )?;

    let cpi_accounts = Transfer {
        from: ctx.accounts.reward_source.to_account_info(),
        to: ctx.accounts.reward_pot.to_account_info(),
        authority: ctx.accounts.authorized_funder.to_account_info(),
    };
    token::transfer(
        CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts),
        amount,
    )?;

    emit!(RewardFunded {
        farm: ctx.accounts.farm.key(),
        funder: ctx.accounts.authorized_funder.key(),
        reward_mint,
        amount,
    });

    Ok(())
}

// --------------------------------------- farmer ops

pub fn init_farmer(ctx: Context<InitFarmer>) -> Result<()> {
    let farm_key = ctx.accounts.farm.key();
    let bank_key = ctx.accounts.bank.key();
    let identity = ctx.accounts.identity.key();
    let vault_key = ctx.accounts.vault.key();

    ctx.accounts.farmer.set_inner(Farmer {
        farm: farm_key,
        identity,
        vault: vault_key,
        bump: ctx.bumps.farmer,
        ..Default::default()
    });
    ctx.accounts.vault.set_inner(Vault {
        bank: bank_key,
        owner: identity,
        bump: ctx.bumps.vault,
        authority_bump: ctx.bumps.vault_authority,
        locked: false,
        gem_count: 0,
    });

    let farm = &mut ctx.accounts.farm;
    farm.farmer_count = farm
        .farmer_count
        .checked_add(1)
        .ok_or(FarmError::ArithmeticOverflow)?;
    let bank = &mut ctx.accounts.bank;
    bank.vault_count = bank
        .vault_count
        .checked_add(1)
        .ok_or(FarmError::ArithmeticOverflow)?;

    msg!("Farmer {} joined farm {}", identity, farm_key);
    Ok(())
}

/// Applies the bank whitelist to a gem about to be deposited.
fn admit_gem(
    bank: &Account<Bank>,
    gem_mint: &Pubkey,
    mint_whitelist_proof: &Option<Account<WhitelistProof>>,
    gem_metadata: &Option<Box<Account<MetadataAccount>>>,
    creator_whitelist_proof: &Option<Account<WhitelistProof>>,
) -> Result<()> {
    let verified_creators: Vec<Pubkey> = match gem_metadata.as_deref() {
        Some(metadata) => {
            require_keys_eq!(metadata.mint, *gem_mint, FarmError::InvalidGemMetadata);
            metadata
                .creators
                .iter()
                .flatten()
                .filter(|creator| creator.verified)
                .map(|creator| creator.address)
                .collect()
        }
        None => Vec::new(),
    };

    bank.admit_gem(
        &bank.key(),
        gem_mint,
        mint_whitelist_proof.as_deref(),
        creator_whitelist_proof.as_deref(),
        &verified_creators,
    )
}

pub fn deposit_gem(ctx: Context<DepositGem>, amount: u64) -> Result<()> {
    let gem_mint = ctx.accounts.gem_mint.key();
    admit_gem(
        &ctx.accounts.bank,
        &gem_mint,
        &ctx.accounts.mint_whitelist_proof,
        &ctx.accounts.gem_metadata,
        &ctx.accounts.creator_whitelist_proof,
    )?;
    ctx.accounts.vault.record_deposit(amount, DepositKind::Plain)?;

    let cpi_accounts = Transfer {
        from: ctx.accounts.gem_source.to_account_info(),
        to: ctx.accounts.gem_box.to_account_info(),
        authority: ctx.accounts.owner.to_account_info(),
    };
    token::transfer(
        CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts),
        amount,
    )?;

    emit!(GemDeposited {
        vault: ctx.accounts.vault.key(),
        owner: ctx.accounts.owner.key(),
        gem_mint,
        amount,
        gem_count: ctx.accounts.vault.gem_count,
        flash: false,
    });

    Ok(())
}

pub fn withdraw_gem(ctx: Context<WithdrawGem>, amount: u64) -> Result<()> {
    ctx.accounts.vault.record_withdrawal(amount)?;

    let vault_key = ctx.accounts.vault.key();
    let bump = ctx.accounts.vault.authority_bump;
    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, vault_key.as_ref(), &[bump]];
    let signer = &[&seeds[..]];
    let cpi_accounts = Transfer {
        from: ctx.accounts.gem_box.to_account_info(),
        to: ctx.accounts.gem_destination.to_account_info(),
        authority: ctx.accounts.vault_authority.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            cpi_accounts,
            signer,
        ),
        amount,
    )?;

    emit!(GemWithdrawn {
        vault: vault_key,
        owner: ctx.accounts.owner.key(),
        gem_mint: ctx.accounts.gem_mint.key(),
        amount,
        gem_count: ctx.accounts.vault.gem_count,
    });

    Ok(())
}

pub fn stake(ctx: Context<Stake>) -> Result<()> {
    let now = now_ts()?;
    let accounts = &mut *ctx.accounts;
    accounts
        .farm
        .begin_staking(now, &mut accounts.farmer, &mut accounts.vault)?;

    emit!(FarmerStaked {
        farm: accounts.farm.key(),
        identity: accounts.identity.key(),
        gems_staked: accounts.farmer.gems_staked,
        min_staking_ends_ts: accounts.farmer.min_staking_ends_ts,
    });

    Ok(())
}

pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
    let now = now_ts()?;
    let accounts = &mut *ctx.accounts;
    let fee = accounts
        .farm
        .end_staking(now, &mut accounts.farmer, &mut accounts.vault)?;

    if fee > 0 {
        system_program::transfer(
            CpiContext::new(
                accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: accounts.identity.to_account_info(),
                    to: accounts.farm_treasury.to_account_info(),
                },
            ),
            fee,
        )?;
    }

    emit!(FarmerUnstaked {
        farm: accounts.farm.key(),
        identity: accounts.identity.key(),
        state: accounts.farmer.state,
        fee_lamports: fee,
    });

    Ok(())
}

pub fn flash_deposit(ctx: Context<FlashDeposit>, amount: u64) -> Result<()> {
    let now = now_ts()?;
    let accounts = &mut *ctx.accounts;
    let gem_mint = accounts.gem_mint.key();
    admit_gem(
        &accounts.bank,
        &gem_mint,
        &accounts.mint_whitelist_proof,
        &accounts.gem_metadata,
        &accounts.creator_whitelist_proof,
    )?;

    accounts
        .farm
        .record_flash_deposit(now, &mut accounts.farmer, &mut accounts.vault, amount)?;

    let cpi_accounts = Transfer {
        from: accounts.gem_source.to_account_info(),
        to: accounts.gem_box.to_account_info(),
        authority: accounts.identity.to_account_info(),
    };
    token::transfer(
        CpiContext::new(accounts.token_program.to_account_info(), cpi_accounts),
        amount,
    )?;

    emit!(GemDeposited {
        vault: accounts.vault.key(),
        owner: accounts.identity.key(),
        gem_mint,
        amount,
        gem_count: accounts.vault.gem_count,
        flash: true,
    });

    Ok(())
}

/// Shared by the signed and unsigned refresh entry points.
fn refresh_farmer_rewards(farm: &mut Farm, farmer: &mut Farmer, reenroll: bool) -> Result<()> {
    let now = now_ts()?;
    farm.update_rewards(now, Some(&mut *farmer), reenroll)?;
    msg!(
        "Farmer {} refreshed (reenroll: {})",
        farmer.identity,
        reenroll
    );
    Ok(())
}

pub fn refresh_farmer(ctx: Context<RefreshFarmer>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    refresh_farmer_rewards(&mut accounts.farm, &mut accounts.farmer, false)
}

pub fn refresh_farmer_signed(ctx: Context<RefreshFarmerSigned>, reenroll: bool) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    refresh_farmer_rewards(&mut accounts.farm, &mut accounts.farmer, reenroll)
}

fn pay_out_reward<'info>(
    token_program: &Program<'info, Token>,
    pot: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    farm_authority: &UncheckedAccount<'info>,
    signer: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    let cpi_accounts = Transfer {
        from: pot.to_account_info(),
        to: destination.to_account_info(),
        authority: farm_authority.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer),
        amount,
    )
}

pub fn claim(ctx: Context<ClaimRewards>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    refresh_farmer_rewards(&mut accounts.farm, &mut accounts.farmer, false)?;

    let farm_key = accounts.farm.key();
    let bump = accounts.farm.farm_authority_bump;
    let seeds: &[&[u8]] = &[FARM_AUTHORITY_SEED, farm_key.as_ref(), &[bump]];
    let signer = &[&seeds[..]];

    // capped by the pot balance
    let amount_a = accounts
        .farmer
        .reward_a
        .claimable()
        .min(accounts.reward_a_pot.amount);
    if amount_a > 0 {
        accounts.farmer.reward_a.record_payout(amount_a)?;
        pay_out_reward(
            &accounts.token_program,
            &accounts.reward_a_pot,
            &accounts.reward_a_destination,
            &accounts.farm_authority,
            signer,
            amount_a,
        )?;
    }

    let amount_b = accounts
        .farmer
        .reward_b
        .claimable()
        .min(accounts.reward_b_pot.amount);
    if amount_b > 0 {
        accounts.farmer.reward_b.record_payout(amount_b)?;
        pay_out_reward(
            &accounts.token_program,
            &accounts.reward_b_pot,
            &accounts.reward_b_destination,
            &accounts.farm_authority,
            signer,
            amount_b,
        )?;
    }

    msg!("Claimed {} reward A and {} reward B", amount_a, amount_b);
    emit!(RewardsClaimed {
        farm: farm_key,
        identity: accounts.identity.key(),
        reward_a_amount: amount_a,
        reward_b_amount: amount_b,
    });

    Ok(())
}
