use crate::error::*;
use crate::state::*;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::metadata::MetadataAccount;
use anchor_spl::token::{Mint, Token, TokenAccount};

// --------------------------------------- farm management

#[derive(Accounts)]
pub struct InitFarm<'info> {
    #[account(init, payer = farm_manager, space = Farm::LEN)]
    pub farm: Box<Account<'info, Farm>>,

    #[account(mut)]
    pub farm_manager: Signer<'info>,

    /// CHECK: PDA owning the reward pots, validated by seeds constraint
    #[account(
        seeds = [FARM_AUTHORITY_SEED, farm.key().as_ref()],
        bump
    )]
    pub farm_authority: UncheckedAccount<'info>,

    /// CHECK: System-owned PDA that only ever holds unstaking fees, validated by seeds constraint
    #[account(
        seeds = [FARM_TREASURY_SEED, farm.key().as_ref()],
        bump
    )]
    pub farm_treasury: UncheckedAccount<'info>,

    #[account(init, payer = farm_manager, space = Bank::LEN)]
    pub bank: Box<Account<'info, Bank>>,

    pub reward_a_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = farm_manager,
        seeds = [REWARD_POT_SEED, farm.key().as_ref(), reward_a_mint.key().as_ref()],
        bump,
        token::mint = reward_a_mint,
        token::authority = farm_authority
    )]
    pub reward_a_pot: Box<Account<'info, TokenAccount>>,

    #[account(
        constraint = reward_b_mint.key() != reward_a_mint.key() @ FarmError::DuplicateRewardMint
    )]
    pub reward_b_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = farm_manager,
        seeds = [REWARD_POT_SEED, farm.key().as_ref(), reward_b_mint.key().as_ref()],
        bump,
        token::mint = reward_b_mint,
        token::authority = farm_authority
    )]
    pub reward_b_pot: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateFarm<'info> {
    #[account(
        mut,
        has_one = farm_manager @ FarmError::InvalidFarmManager
    )]
    pub farm: Box<Account<'info, Farm>>,

    pub farm_manager: Signer<'info>,
}

#[derive(Accounts)]
pub struct TreasuryPayout<'info> {
    #[account(
        has_one = farm_manager @ FarmError::InvalidFarmManager,
        has_one = farm_treasury @ FarmError::InvalidFarmTreasury
    )]
    pub farm: Box<Account<'info, Farm>>,

    pub farm_manager: Signer<'info>,

    /// CHECK: System-owned fee PDA, validated by seeds constraint
    #[account(
        mut,
        seeds = [FARM_TREASURY_SEED, farm.key().as_ref()],
        bump = farm.farm_treasury_bump
    )]
    pub farm_treasury: UncheckedAccount<'info>,

    /// CHECK: Any lamport recipient chosen by the farm manager
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

// --------------------------------------- bank whitelist

#[derive(Accounts)]
pub struct AddToBankWhitelist<'info> {
    #[account(
        has_one = farm_manager @ FarmError::InvalidFarmManager,
        has_one = bank @ FarmError::InvalidBank
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(mut)]
    pub farm_manager: Signer<'info>,

    #[account(mut)]
    pub bank: Box<Account<'info, Bank>>,

    /// CHECK: Creator or mint address being whitelisted, never read
    pub address_to_whitelist: UncheckedAccount<'info>,

    // init fails if the address is already whitelisted
    #[account(
        init,
        payer = farm_manager,
        space = WhitelistProof::LEN,
        seeds = [WHITELIST_SEED, bank.key().as_ref(), address_to_whitelist.key().as_ref()],
        bump
    )]
    pub whitelist_proof: Box<Account<'info, WhitelistProof>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RemoveFromBankWhitelist<'info> {
    #[account(
        has_one = farm_manager @ FarmError::InvalidFarmManager,
        has_one = bank @ FarmError::InvalidBank
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(mut)]
    pub farm_manager: Signer<'info>,

    #[account(mut)]
    pub bank: Box<Account<'info, Bank>>,

    /// CHECK: Creator or mint address being removed, never read
    pub address_to_remove: UncheckedAccount<'info>,

    #[account(
        mut,
        close = farm_manager,
        has_one = bank @ FarmError::InvalidBank,
        seeds = [WHITELIST_SEED, bank.key().as_ref(), address_to_remove.key().as_ref()],
        bump = whitelist_proof.bump
    )]
    pub whitelist_proof: Box<Account<'info, WhitelistProof>>,
}

// --------------------------------------- funders

#[derive(Accounts)]
pub struct AuthorizeFunder<'info> {
    #[account(
        mut,
        has_one = farm_manager @ FarmError::InvalidFarmManager
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(mut)]
    pub farm_manager: Signer<'info>,

    /// CHECK: Funder being authorized, never read
    pub funder_to_authorize: UncheckedAccount<'info>,

    // init_if_needed keeps repeated authorization a no-op
    #[account(
        init_if_needed,
        payer = farm_manager,
        space = AuthorizationProof::LEN,
        seeds = [AUTHORIZATION_SEED, farm.key().as_ref(), funder_to_authorize.key().as_ref()],
        bump
    )]
    pub authorization_proof: Box<Account<'info, AuthorizationProof>>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct DeauthorizeFunder<'info> {
    #[account(
        mut,
        has_one = farm_manager @ FarmError::InvalidFarmManager
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(mut)]
    pub farm_manager: Signer<'info>,

    /// CHECK: Funder being deauthorized, never read
    pub funder_to_deauthorize: UncheckedAccount<'info>,

    // a closed proof fails deserialization, so deauthorizing twice errors
    #[account(
        mut,
        close = farm_manager,
        seeds = [AUTHORIZATION_SEED, farm.key().as_ref(), funder_to_deauthorize.key().as_ref()],
        bump = authorization_proof.bump
    )]
    pub authorization_proof: Box<Account<'info, AuthorizationProof>>,
}

#[derive(Accounts)]
pub struct FundReward<'info> {
    #[account(mut)]
    pub farm: Box<Account<'info, Farm>>,

    /// CHECK: Only existence matters. A revoked proof is system-owned again and
    /// fails the owner constraint.
    #[account(
        seeds = [AUTHORIZATION_SEED, farm.key().as_ref(), authorized_funder.key().as_ref()],
        bump,
        owner = crate::ID @ FarmError::NotOwned
    )]
    pub authorization_proof: UncheckedAccount<'info>,

    #[account(mut)]
    pub authorized_funder: Signer<'info>,

    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [REWARD_POT_SEED, farm.key().as_ref(), reward_mint.key().as_ref()],
        bump
    )]
    pub reward_pot: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = authorized_funder
    )]
    pub reward_source: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

// --------------------------------------- farmer ops

#[derive(Accounts)]
pub struct InitFarmer<'info> {
    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank
    )]
    pub farm: Box<Account<'info, Farm>>,

    pub identity: Signer<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut)]
    pub bank: Box<Account<'info, Bank>>,

    #[account(
        init,
        payer = payer,
        space = Farmer::LEN,
        seeds = [FARMER_SEED, farm.key().as_ref(), identity.key().as_ref()],
        bump
    )]
    pub farmer: Box<Account<'info, Farmer>>,

    #[account(
        init,
        payer = payer,
        space = Vault::LEN,
        seeds = [VAULT_SEED, bank.key().as_ref(), identity.key().as_ref()],
        bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// CHECK: PDA owning the vault's gem boxes, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct DepositGem<'info> {
    pub bank: Box<Account<'info, Bank>>,

    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank,
        has_one = owner @ FarmError::InvalidVaultOwner,
        seeds = [VAULT_SEED, bank.key().as_ref(), owner.key().as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: PDA owning the vault's gem boxes, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub gem_mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = owner,
        seeds = [GEM_BOX_SEED, vault.key().as_ref(), gem_mint.key().as_ref()],
        bump,
        token::mint = gem_mint,
        token::authority = vault_authority
    )]
    pub gem_box: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = gem_mint,
        token::authority = owner
    )]
    pub gem_source: Box<Account<'info, TokenAccount>>,

    pub mint_whitelist_proof: Option<Account<'info, WhitelistProof>>,
    pub gem_metadata: Option<Box<Account<'info, MetadataAccount>>>,
    pub creator_whitelist_proof: Option<Account<'info, WhitelistProof>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct WithdrawGem<'info> {
    pub bank: Box<Account<'info, Bank>>,

    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank,
        has_one = owner @ FarmError::InvalidVaultOwner,
        seeds = [VAULT_SEED, bank.key().as_ref(), owner.key().as_ref()],
        bump = vault.bump
    )]
    pub vault: Box<Account<'info, Vault>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: PDA owning the vault's gem boxes, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub gem_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [GEM_BOX_SEED, vault.key().as_ref(), gem_mint.key().as_ref()],
        bump
    )]
    pub gem_box: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = gem_mint,
        associated_token::authority = owner
    )]
    pub gem_destination: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mut,
        has_one = farm @ FarmError::InvalidFarmer,
        has_one = identity @ FarmError::InvalidFarmer,
        has_one = vault @ FarmError::InvalidVault,
        seeds = [FARMER_SEED, farm.key().as_ref(), identity.key().as_ref()],
        bump = farmer.bump
    )]
    pub farmer: Box<Account<'info, Farmer>>,

    pub identity: Signer<'info>,

    pub bank: Box<Account<'info, Bank>>,

    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank
    )]
    pub vault: Box<Account<'info, Vault>>,
}

#[derive(Accounts)]
pub struct Unstake<'info> {
    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank,
        has_one = farm_treasury @ FarmError::InvalidFarmTreasury
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mut,
        has_one = farm @ FarmError::InvalidFarmer,
        has_one = identity @ FarmError::InvalidFarmer,
        has_one = vault @ FarmError::InvalidVault,
        seeds = [FARMER_SEED, farm.key().as_ref(), identity.key().as_ref()],
        bump = farmer.bump
    )]
    pub farmer: Box<Account<'info, Farmer>>,

    #[account(mut)]
    pub identity: Signer<'info>,

    pub bank: Box<Account<'info, Bank>>,

    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// CHECK: System-owned fee PDA, validated by seeds constraint
    #[account(
        mut,
        seeds = [FARM_TREASURY_SEED, farm.key().as_ref()],
        bump = farm.farm_treasury_bump
    )]
    pub farm_treasury: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct FlashDeposit<'info> {
    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank
    )]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mut,
        has_one = farm @ FarmError::InvalidFarmer,
        has_one = identity @ FarmError::InvalidFarmer,
        has_one = vault @ FarmError::InvalidVault,
        seeds = [FARMER_SEED, farm.key().as_ref(), identity.key().as_ref()],
        bump = farmer.bump
    )]
    pub farmer: Box<Account<'info, Farmer>>,

    #[account(mut)]
    pub identity: Signer<'info>,

    pub bank: Box<Account<'info, Bank>>,

    #[account(
        mut,
        has_one = bank @ FarmError::InvalidBank,
        constraint = vault.owner == identity.key() @ FarmError::InvalidVaultOwner
    )]
    pub vault: Box<Account<'info, Vault>>,

    /// CHECK: PDA owning the vault's gem boxes, validated by seeds constraint
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    pub gem_mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = identity,
        seeds = [GEM_BOX_SEED, vault.key().as_ref(), gem_mint.key().as_ref()],
        bump,
        token::mint = gem_mint,
        token::authority = vault_authority
    )]
    pub gem_box: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = gem_mint,
        token::authority = identity
    )]
    pub gem_source: Box<Account<'info, TokenAccount>>,

    pub mint_whitelist_proof: Option<Account<'info, WhitelistProof>>,
    pub gem_metadata: Option<Box<Account<'info, MetadataAccount>>>,
    pub creator_whitelist_proof: Option<Account<'info, WhitelistProof>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RefreshFarmer<'info> {
    #[account(mut)]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mut,
        has_one = farm @ FarmError::InvalidFarmer,
        has_one = identity @ FarmError::InvalidFarmer,
        seeds = [FARMER_SEED, farm.key().as_ref(), identity.key().as_ref()],
        bump = farmer.bump
    )]
    pub farmer: Box<Account<'info, Farmer>>,

    /// CHECK: Only used to derive the farmer address; anyone may refresh
    pub identity: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct RefreshFarmerSigned<'info> {
    #[account(mut)]
    pub farm: Box<Account<'info, Farm>>,

    #[account(
        mut,
        has_one = farm @ FarmError::InvalidFarmer,
        has_one = identity @ FarmError::InvalidFarmer,
        seeds = [FARMER_SEED, farm.key().as_ref(), identity.key().as_ref()],
        bump = farmer.bump
    )]
    pub farmer: Box<Account<'info, Farmer>>,

    pub identity: Signer<'info>,
}

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(
        mut,
        has_one = farm_authority @ FarmError::InvalidFarmAuthority
    )]
    pub farm: Box<Account<'info, Farm>>,

    /// CHECK: PDA owning the reward pots, validated by seeds constraint
    #[account(
        seeds = [FARM_AUTHORITY_SEED, farm.key().as_ref()],
        bump = farm.farm_authority_bump
    )]
    pub farm_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        has_one = farm @ FarmError::InvalidFarmer,
        has_one = identity @ FarmError::InvalidFarmer,
        seeds = [FARMER_SEED, farm.key().as_ref(), identity.key().as_ref()],
        bump = farmer.bump
    )]
    pub farmer: Box<Account<'info, Farmer>>,

    #[account(mut)]
    pub identity: Signer<'info>,

    #[account(address = farm.reward_a.reward_mint @ FarmError::UnknownRewardMint)]
    pub reward_a_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [REWARD_POT_SEED, farm.key().as_ref(), reward_a_mint.key().as_ref()],
        bump
    )]
    pub reward_a_pot: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = identity,
        associated_token::mint = reward_a_mint,
        associated_token::authority = identity
    )]
    pub reward_a_destination: Box<Account<'info, TokenAccount>>,

    #[account(address = farm.reward_b.reward_mint @ FarmError::UnknownRewardMint)]
    pub reward_b_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        seeds = [REWARD_POT_SEED, farm.key().as_ref(), reward_b_mint.key().as_ref()],
        bump
    )]
    pub reward_b_pot: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = identity,
        associated_token::mint = reward_b_mint,
        associated_token::authority = identity
    )]
    pub reward_b_destination: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
