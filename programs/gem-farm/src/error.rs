use anchor_lang::prelude::*;

#[error_code]
pub enum FarmError {
    #[msg("Invalid amount")]
    InvalidAmount = 1,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow = 2,
    #[msg("Clock returned a negative timestamp")]
    InvalidTimestamp = 3,

    #[msg("Vault is locked")]
    VaultLocked = 4,
    #[msg("Not enough gems in the vault")]
    InsufficientGems = 5,
    #[msg("Gem is not whitelisted by this bank")]
    NotWhitelisted = 6,
    #[msg("Gem metadata does not belong to the deposited mint")]
    InvalidGemMetadata = 7,
    #[msg("Invalid bank")]
    InvalidBank = 8,
    #[msg("Invalid vault")]
    InvalidVault = 9,
    #[msg("Invalid vault owner")]
    InvalidVaultOwner = 10,

    #[msg("Farmer is already staked")]
    FarmerAlreadyStaked = 11,
    #[msg("Farmer is not staked")]
    FarmerNotStaked = 12,
    #[msg("Farmer is cooling down")]
    FarmerInCooldown = 13,
    #[msg("Minimum staking period has not passed")]
    MinStakingNotPassed = 14,
    #[msg("Cooldown period has not passed")]
    CooldownNotPassed = 15,
    #[msg("Vault holds no gems to stake")]
    NothingToStake = 16,
    #[msg("Invalid farmer")]
    InvalidFarmer = 17,

    #[msg("Invalid farm manager")]
    InvalidFarmManager = 18,
    #[msg("Invalid farm authority")]
    InvalidFarmAuthority = 19,
    #[msg("Invalid farm treasury")]
    InvalidFarmTreasury = 20,
    #[msg("Reward mints must differ")]
    DuplicateRewardMint = 21,

    #[msg("The given account is not owned by the executing program")]
    NotOwned = 22,
    #[msg("Insufficient treasury balance")]
    InsufficientTreasuryBalance = 23,

    #[msg("Reward mint is not configured on this farm")]
    UnknownRewardMint = 24,
    #[msg("Reward config does not match the reward type")]
    WrongRewardType = 25,
    #[msg("Reward config missing for the reward type")]
    MissingRewardConfig = 26,
    #[msg("Reward duration must be positive")]
    InvalidRewardDuration = 27,
    #[msg("Unstaking fee is below the treasury's rent-exempt minimum")]
    InvalidUnstakingFee = 28,
}
