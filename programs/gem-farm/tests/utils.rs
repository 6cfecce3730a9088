#![cfg(feature = "test-sbf")]
#![allow(dead_code)]

// Test utilities for the gem farm program

use anchor_lang::{AccountDeserialize, AnchorSerialize};
use gem_farm::rewards::{FixedRateConfig, RewardType, VariableRateConfig};
use gem_farm::state::*;
use litesvm::LiteSVM;
use litesvm_token::{get_spl_account, CreateAssociatedTokenAccount, CreateMint, MintTo};
use solana_sdk::{
    account::Account,
    hash::hash,
    instruction::{AccountMeta, Instruction},
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use solana_system_interface::program::ID as system_program;
use spl_associated_token_account::get_associated_token_address;

// Program ID matching declare_id!
pub const PROGRAM_ID: Pubkey = Pubkey::new_from_array(gem_farm::ID.to_bytes());

pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;

pub const METADATA_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub const UNSTAKING_FEE: u64 = LAMPORTS_PER_SOL / 100;

pub fn default_farm_config() -> FarmConfig {
    FarmConfig {
        min_staking_period_sec: 5,
        cooldown_period_sec: 10,
        unstaking_fee_lamp: UNSTAKING_FEE,
    }
}

// ======================== HELPERS ========================

/// Build Anchor instruction discriminator (first 8 bytes of sha256("global:method_name"))
pub fn anchor_discriminator(method: &str) -> [u8; 8] {
    let preimage = format!("global:{}", method);
    let hash = hash(preimage.as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash.to_bytes()[..8]);
    discriminator
}

/// Discriminator followed by the borsh encoded arguments
pub fn ix_data<T: AnchorSerialize>(method: &str, args: &T) -> Vec<u8> {
    let mut data = anchor_discriminator(method).to_vec();
    args.serialize(&mut data).expect("args should serialize");
    data
}

pub fn to_anchor(pubkey: &Pubkey) -> anchor_lang::prelude::Pubkey {
    anchor_lang::prelude::Pubkey::new_from_array(pubkey.to_bytes())
}

pub fn setup_svm() -> LiteSVM {
    let mut svm = LiteSVM::new();
    let program_bytes = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../target/deploy/gem_farm.so"
    ));
    svm.add_program(PROGRAM_ID, program_bytes)
        .expect("Failed to add gem farm program");
    svm
}

pub fn create_funded_account(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports)
        .expect("Airdrop should succeed");
    keypair
}

/// Advance the SVM clock by the specified number of seconds
pub fn advance_time(svm: &mut LiteSVM, seconds: u64) {
    let mut clock: solana_sdk::clock::Clock = svm.get_sysvar();
    clock.unix_timestamp += seconds as i64;
    svm.set_sysvar(&clock);
}

pub fn send(
    svm: &mut LiteSVM,
    ixs: &[Instruction],
    payer: &Keypair,
    signers: &[&Keypair],
) -> Result<(), String> {
    let tx = Transaction::new_signed_with_payer(
        ixs,
        Some(&payer.pubkey()),
        signers,
        svm.latest_blockhash(),
    );
    svm.send_transaction(tx)
        .map(|_| ())
        .map_err(|failed| format!("{:?}", failed))
}

pub fn assert_custom_error(result: Result<(), String>, code: u32) {
    let err = result.expect_err("Transaction should have failed");
    assert!(
        err.contains(&format!("Custom({})", code)),
        "expected custom error {}, got {}",
        code,
        err
    );
}

pub fn fetch<T: AccountDeserialize>(svm: &LiteSVM, address: &Pubkey) -> T {
    let account = svm.get_account(address).expect("Account should exist");
    T::try_deserialize(&mut account.data.as_slice()).expect("Account should deserialize")
}

pub fn token_balance(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let account: spl_token::state::Account =
        get_spl_account(svm, token_account).expect("Token account should exist");
    account.amount
}

pub fn lamports(svm: &LiteSVM, address: &Pubkey) -> u64 {
    svm.get_balance(address).unwrap_or(0)
}

// ======================== PDAs ========================

pub fn derive_farm_authority_pda(farm: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[FARM_AUTHORITY_SEED, farm.as_ref()], &PROGRAM_ID).0
}

pub fn derive_farm_treasury_pda(farm: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[FARM_TREASURY_SEED, farm.as_ref()], &PROGRAM_ID).0
}

pub fn derive_farmer_pda(farm: &Pubkey, identity: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[FARMER_SEED, farm.as_ref(), identity.as_ref()],
        &PROGRAM_ID,
    )
    .0
}

pub fn derive_vault_pda(bank: &Pubkey, owner: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[VAULT_SEED, bank.as_ref(), owner.as_ref()], &PROGRAM_ID).0
}

pub fn derive_vault_authority_pda(vault: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[VAULT_AUTHORITY_SEED, vault.as_ref()], &PROGRAM_ID).0
}

pub fn derive_gem_box_pda(vault: &Pubkey, gem_mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[GEM_BOX_SEED, vault.as_ref(), gem_mint.as_ref()],
        &PROGRAM_ID,
    )
    .0
}

pub fn derive_reward_pot_pda(farm: &Pubkey, reward_mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[REWARD_POT_SEED, farm.as_ref(), reward_mint.as_ref()],
        &PROGRAM_ID,
    )
    .0
}

pub fn derive_whitelist_proof_pda(bank: &Pubkey, address: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[WHITELIST_SEED, bank.as_ref(), address.as_ref()],
        &PROGRAM_ID,
    )
    .0
}

pub fn derive_authorization_proof_pda(farm: &Pubkey, funder: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[AUTHORIZATION_SEED, farm.as_ref(), funder.as_ref()],
        &PROGRAM_ID,
    )
    .0
}

// Optional accounts left out are passed as the program id
fn optional(account: Option<Pubkey>) -> AccountMeta {
    AccountMeta::new_readonly(account.unwrap_or(PROGRAM_ID), false)
}

// ======================== INSTRUCTIONS ========================

#[allow(clippy::too_many_arguments)]
pub fn build_init_farm_ix(
    farm: &Pubkey,
    bank: &Pubkey,
    farm_manager: &Pubkey,
    reward_a_mint: &Pubkey,
    reward_b_mint: &Pubkey,
    reward_type_a: RewardType,
    reward_type_b: RewardType,
    config: FarmConfig,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, true),
            AccountMeta::new(*farm_manager, true),
            AccountMeta::new_readonly(derive_farm_authority_pda(farm), false),
            AccountMeta::new_readonly(derive_farm_treasury_pda(farm), false),
            AccountMeta::new(*bank, true),
            AccountMeta::new_readonly(*reward_a_mint, false),
            AccountMeta::new(derive_reward_pot_pda(farm, reward_a_mint), false),
            AccountMeta::new_readonly(*reward_b_mint, false),
            AccountMeta::new(derive_reward_pot_pda(farm, reward_b_mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("init_farm", &(reward_type_a, reward_type_b, config)),
    }
}

pub fn build_update_farm_ix(
    farm: &Pubkey,
    farm_manager: &Pubkey,
    config: Option<FarmConfig>,
    new_manager: Option<Pubkey>,
) -> Instruction {
    let new_manager = new_manager.map(|manager| to_anchor(&manager));
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new_readonly(*farm_manager, true),
        ],
        data: ix_data("update_farm", &(config, new_manager)),
    }
}

pub fn build_payout_from_treasury_ix(
    farm: &Pubkey,
    farm_manager: &Pubkey,
    destination: &Pubkey,
    lamports: u64,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*farm, false),
            AccountMeta::new_readonly(*farm_manager, true),
            AccountMeta::new(derive_farm_treasury_pda(farm), false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("payout_from_treasury", &lamports),
    }
}

pub fn build_add_to_bank_whitelist_ix(
    farm: &Pubkey,
    farm_manager: &Pubkey,
    bank: &Pubkey,
    address: &Pubkey,
    whitelist_type: WhitelistType,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*farm, false),
            AccountMeta::new(*farm_manager, true),
            AccountMeta::new(*bank, false),
            AccountMeta::new_readonly(*address, false),
            AccountMeta::new(derive_whitelist_proof_pda(bank, address), false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("add_to_bank_whitelist", &whitelist_type),
    }
}

pub fn build_remove_from_bank_whitelist_ix(
    farm: &Pubkey,
    farm_manager: &Pubkey,
    bank: &Pubkey,
    address: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*farm, false),
            AccountMeta::new(*farm_manager, true),
            AccountMeta::new(*bank, false),
            AccountMeta::new_readonly(*address, false),
            AccountMeta::new(derive_whitelist_proof_pda(bank, address), false),
        ],
        data: ix_data("remove_from_bank_whitelist", &()),
    }
}

pub fn build_authorize_funder_ix(
    farm: &Pubkey,
    farm_manager: &Pubkey,
    funder: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new(*farm_manager, true),
            AccountMeta::new_readonly(*funder, false),
            AccountMeta::new(derive_authorization_proof_pda(farm, funder), false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("authorize_funder", &()),
    }
}

pub fn build_deauthorize_funder_ix(
    farm: &Pubkey,
    farm_manager: &Pubkey,
    funder: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new(*farm_manager, true),
            AccountMeta::new_readonly(*funder, false),
            AccountMeta::new(derive_authorization_proof_pda(farm, funder), false),
        ],
        data: ix_data("deauthorize_funder", &()),
    }
}

pub fn build_fund_reward_ix(
    farm: &Pubkey,
    funder: &Pubkey,
    reward_mint: &Pubkey,
    reward_source: &Pubkey,
    variable_rate_config: Option<VariableRateConfig>,
    fixed_rate_config: Option<FixedRateConfig>,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new_readonly(derive_authorization_proof_pda(farm, funder), false),
            AccountMeta::new(*funder, true),
            AccountMeta::new_readonly(*reward_mint, false),
            AccountMeta::new(derive_reward_pot_pda(farm, reward_mint), false),
            AccountMeta::new(*reward_source, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: ix_data("fund_reward", &(variable_rate_config, fixed_rate_config)),
    }
}

pub fn build_init_farmer_ix(
    farm: &Pubkey,
    bank: &Pubkey,
    identity: &Pubkey,
    payer: &Pubkey,
) -> Instruction {
    let vault = derive_vault_pda(bank, identity);
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new_readonly(*identity, true),
            AccountMeta::new(*payer, true),
            AccountMeta::new(*bank, false),
            AccountMeta::new(derive_farmer_pda(farm, identity), false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(derive_vault_authority_pda(&vault), false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("init_farmer", &()),
    }
}

pub fn build_deposit_gem_ix(
    bank: &Pubkey,
    owner: &Pubkey,
    gem_mint: &Pubkey,
    gem_source: &Pubkey,
    amount: u64,
    mint_whitelist_proof: Option<Pubkey>,
) -> Instruction {
    let vault = derive_vault_pda(bank, owner);
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*bank, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(derive_vault_authority_pda(&vault), false),
            AccountMeta::new_readonly(*gem_mint, false),
            AccountMeta::new(derive_gem_box_pda(&vault, gem_mint), false),
            AccountMeta::new(*gem_source, false),
            optional(mint_whitelist_proof),
            optional(None),
            optional(None),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("deposit_gem", &amount),
    }
}

/// Deposit admitted through a verified creator of the gem's metadata
pub fn build_deposit_gem_by_creator_ix(
    bank: &Pubkey,
    owner: &Pubkey,
    gem_mint: &Pubkey,
    gem_source: &Pubkey,
    amount: u64,
    gem_metadata: &Pubkey,
    creator: &Pubkey,
) -> Instruction {
    let vault = derive_vault_pda(bank, owner);
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*bank, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(derive_vault_authority_pda(&vault), false),
            AccountMeta::new_readonly(*gem_mint, false),
            AccountMeta::new(derive_gem_box_pda(&vault, gem_mint), false),
            AccountMeta::new(*gem_source, false),
            optional(None),
            optional(Some(*gem_metadata)),
            optional(Some(derive_whitelist_proof_pda(bank, creator))),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("deposit_gem", &amount),
    }
}

pub fn build_withdraw_gem_ix(
    bank: &Pubkey,
    owner: &Pubkey,
    gem_mint: &Pubkey,
    amount: u64,
) -> Instruction {
    let vault = derive_vault_pda(bank, owner);
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*bank, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(derive_vault_authority_pda(&vault), false),
            AccountMeta::new_readonly(*gem_mint, false),
            AccountMeta::new(derive_gem_box_pda(&vault, gem_mint), false),
            AccountMeta::new(get_associated_token_address(owner, gem_mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("withdraw_gem", &amount),
    }
}

pub fn build_stake_ix(farm: &Pubkey, bank: &Pubkey, identity: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new(derive_farmer_pda(farm, identity), false),
            AccountMeta::new_readonly(*identity, true),
            AccountMeta::new_readonly(*bank, false),
            AccountMeta::new(derive_vault_pda(bank, identity), false),
        ],
        data: ix_data("stake", &()),
    }
}

pub fn build_unstake_ix(farm: &Pubkey, bank: &Pubkey, identity: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new(derive_farmer_pda(farm, identity), false),
            AccountMeta::new(*identity, true),
            AccountMeta::new_readonly(*bank, false),
            AccountMeta::new(derive_vault_pda(bank, identity), false),
            AccountMeta::new(derive_farm_treasury_pda(farm), false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("unstake", &()),
    }
}

pub fn build_flash_deposit_ix(
    farm: &Pubkey,
    bank: &Pubkey,
    identity: &Pubkey,
    gem_mint: &Pubkey,
    gem_source: &Pubkey,
    amount: u64,
    mint_whitelist_proof: Option<Pubkey>,
) -> Instruction {
    let vault = derive_vault_pda(bank, identity);
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new(derive_farmer_pda(farm, identity), false),
            AccountMeta::new(*identity, true),
            AccountMeta::new_readonly(*bank, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(derive_vault_authority_pda(&vault), false),
            AccountMeta::new_readonly(*gem_mint, false),
            AccountMeta::new(derive_gem_box_pda(&vault, gem_mint), false),
            AccountMeta::new(*gem_source, false),
            optional(mint_whitelist_proof),
            optional(None),
            optional(None),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("flash_deposit", &amount),
    }
}

pub fn build_refresh_farmer_ix(farm: &Pubkey, identity: &Pubkey) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new(derive_farmer_pda(farm, identity), false),
            AccountMeta::new_readonly(*identity, false),
        ],
        data: ix_data("refresh_farmer", &()),
    }
}

pub fn build_refresh_farmer_signed_ix(
    farm: &Pubkey,
    identity: &Pubkey,
    reenroll: bool,
    identity_signs: bool,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new(derive_farmer_pda(farm, identity), false),
            AccountMeta::new_readonly(*identity, identity_signs),
        ],
        data: ix_data("refresh_farmer_signed", &reenroll),
    }
}

pub fn build_claim_ix(
    farm: &Pubkey,
    identity: &Pubkey,
    reward_a_mint: &Pubkey,
    reward_b_mint: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*farm, false),
            AccountMeta::new_readonly(derive_farm_authority_pda(farm), false),
            AccountMeta::new(derive_farmer_pda(farm, identity), false),
            AccountMeta::new(*identity, true),
            AccountMeta::new_readonly(*reward_a_mint, false),
            AccountMeta::new(derive_reward_pot_pda(farm, reward_a_mint), false),
            AccountMeta::new(get_associated_token_address(identity, reward_a_mint), false),
            AccountMeta::new_readonly(*reward_b_mint, false),
            AccountMeta::new(derive_reward_pot_pda(farm, reward_b_mint), false),
            AccountMeta::new(get_associated_token_address(identity, reward_b_mint), false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program, false),
        ],
        data: ix_data("claim", &()),
    }
}

// ======================== SETUP HELPERS ========================

pub struct FarmFixture {
    pub farm: Keypair,
    pub bank: Keypair,
    pub manager: Keypair,
    pub reward_a_mint: Pubkey,
    pub reward_b_mint: Pubkey,
}

impl FarmFixture {
    pub fn farm(&self) -> Pubkey {
        self.farm.pubkey()
    }

    pub fn bank(&self) -> Pubkey {
        self.bank.pubkey()
    }
}

pub fn create_mint(svm: &mut LiteSVM, authority: &Keypair) -> Pubkey {
    CreateMint::new(svm, authority)
        .authority(&authority.pubkey())
        .decimals(0)
        .send()
        .expect("Mint creation should succeed")
}

/// Creates the owner's associated token account and mints `amount` into it.
pub fn mint_to_owner(
    svm: &mut LiteSVM,
    mint_authority: &Keypair,
    mint: &Pubkey,
    owner: &Keypair,
    amount: u64,
) -> Pubkey {
    let ata = CreateAssociatedTokenAccount::new(svm, owner, mint)
        .owner(&owner.pubkey())
        .send()
        .expect("ATA creation should succeed");
    MintTo::new(svm, mint_authority, mint, &ata, amount)
        .owner(mint_authority)
        .send()
        .expect("Mint to should succeed");
    ata
}

/// Writes a Metaplex metadata account for `gem_mint` listing `creator`.
/// Returns the metadata address.
pub fn set_gem_metadata(
    svm: &mut LiteSVM,
    gem_mint: &Pubkey,
    creator: &Pubkey,
    verified: bool,
) -> Pubkey {
    let (metadata, _) = Pubkey::find_program_address(
        &[b"metadata", METADATA_PROGRAM_ID.as_ref(), gem_mint.as_ref()],
        &METADATA_PROGRAM_ID,
    );

    // MetadataV1 with one creator; the optional trailing fields are absent
    let mut data = vec![4u8];
    data.extend_from_slice(creator.as_ref());
    data.extend_from_slice(gem_mint.as_ref());
    for field in ["Gem", "GEM", "https://example.com/gem.json"] {
        data.extend_from_slice(&(field.len() as u32).to_le_bytes());
        data.extend_from_slice(field.as_bytes());
    }
    data.extend_from_slice(&500u16.to_le_bytes());
    data.push(1);
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(creator.as_ref());
    data.push(verified as u8);
    data.push(100);
    data.extend_from_slice(&[0, 1, 0]);
    data.extend_from_slice(&[0; 5]);

    svm.set_account(
        metadata,
        Account {
            lamports: svm.minimum_balance_for_rent_exemption(data.len()),
            data,
            owner: METADATA_PROGRAM_ID,
            executable: false,
            rent_epoch: 0,
        },
    )
    .expect("Metadata account should be set");
    metadata
}

pub fn setup_farm(svm: &mut LiteSVM, config: FarmConfig) -> FarmFixture {
    let manager = create_funded_account(svm, 10 * LAMPORTS_PER_SOL);
    let farm = Keypair::new();
    let bank = Keypair::new();
    let reward_a_mint = create_mint(svm, &manager);
    let reward_b_mint = create_mint(svm, &manager);

    let ix = build_init_farm_ix(
        &farm.pubkey(),
        &bank.pubkey(),
        &manager.pubkey(),
        &reward_a_mint,
        &reward_b_mint,
        RewardType::Variable,
        RewardType::Fixed,
        config,
    );
    send(svm, &[ix], &manager, &[&manager, &farm, &bank]).expect("Farm init should succeed");

    FarmFixture {
        farm,
        bank,
        manager,
        reward_a_mint,
        reward_b_mint,
    }
}

pub struct FarmerFixture {
    pub identity: Keypair,
    pub gem_mint: Pubkey,
    pub gem_source: Pubkey,
}

/// Creates a farmer holding `gems` units of a fresh gem mint.
pub fn setup_farmer(svm: &mut LiteSVM, fixture: &FarmFixture, gems: u64) -> FarmerFixture {
    let identity = create_funded_account(svm, 10 * LAMPORTS_PER_SOL);
    let gem_mint = create_mint(svm, &fixture.manager);
    let gem_source = mint_to_owner(svm, &fixture.manager, &gem_mint, &identity, gems);

    let ix = build_init_farmer_ix(
        &fixture.farm(),
        &fixture.bank(),
        &identity.pubkey(),
        &identity.pubkey(),
    );
    send(svm, &[ix], &identity, &[&identity]).expect("Farmer init should succeed");

    FarmerFixture {
        identity,
        gem_mint,
        gem_source,
    }
}
