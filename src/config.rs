use std::collections::HashMap;
use std::str::FromStr;
use std::{fmt, fs, path::Path};

use alloy::primitives::Address;
use dotenv::dotenv;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const BASE_RPC_URL: &str = "BASE_RPC_URL";
pub const UNISWAP_FACTORY_ADDRESS: &str = "UNISWAP_FACTORY_ADDRESS";
pub const NONFUNGIBLE_POSITION_MANAGER_ADDRESS: &str = "NONFUNGIBLE_POSITION_MANAGER_ADDRESS";
pub const UNISWAP_ROUTER_ADDRESS: &str = "UNISWAP_ROUTER_ADDRESS";
pub const TOKEN_IN_ADDRESS: &str = "TOKEN_IN_ADDRESS";
pub const TOKEN_OUT_ADDRESS: &str = "TOKEN_OUT_ADDRESS";

pub const DEFAULT_SETTINGS_PATH: &str = "config/default.yaml";

/// Widest tick range the Uniswap V3 tick math accepts.
const MAX_TICK: i32 = 887_272;

/// Fee tiers are `uint24` on chain.
const MAX_FEE: u32 = 0xFF_FFFF;

/// Largest precision whose unit, 10^decimals, still fits in a `uint256`.
const MAX_DECIMALS: u8 = 77;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("invalid address in {name}: {reason}")]
    InvalidAddress { name: &'static str, reason: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The operational programs shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    CheckLiquidity,
    AddLiquidity,
    Swap,
    VerifyFunctions,
}

impl Program {
    /// Environment variables that must be present and non-empty before the program
    /// is allowed to touch the network.
    pub const fn required_vars(self) -> &'static [&'static str] {
        match self {
            Program::CheckLiquidity => &[
                PRIVATE_KEY,
                BASE_RPC_URL,
                UNISWAP_FACTORY_ADDRESS,
                TOKEN_IN_ADDRESS,
                TOKEN_OUT_ADDRESS,
            ],
            Program::AddLiquidity => &[
                PRIVATE_KEY,
                BASE_RPC_URL,
                NONFUNGIBLE_POSITION_MANAGER_ADDRESS,
                TOKEN_IN_ADDRESS,
                TOKEN_OUT_ADDRESS,
            ],
            Program::Swap => &[
                PRIVATE_KEY,
                BASE_RPC_URL,
                UNISWAP_ROUTER_ADDRESS,
                UNISWAP_FACTORY_ADDRESS,
                NONFUNGIBLE_POSITION_MANAGER_ADDRESS,
                TOKEN_IN_ADDRESS,
                TOKEN_OUT_ADDRESS,
            ],
            Program::VerifyFunctions => &[BASE_RPC_URL, UNISWAP_ROUTER_ADDRESS],
        }
    }
}

/// Snapshot of the process environment, optionally seeded from a `.env` file.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    pub fn load() -> Self {
        dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Fails with every missing name at once, so a single run reports the whole gap.
    pub fn require(&self, names: &[&'static str]) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = names
            .iter()
            .copied()
            .filter(|name| self.value(name).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingVars(missing))
        }
    }

    fn value(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn string(&self, name: &'static str) -> Result<String, ConfigError> {
        self.value(name)
            .map(str::to_string)
            .ok_or(ConfigError::MissingVars(vec![name]))
    }

    fn address(&self, name: &'static str) -> Result<Address, ConfigError> {
        let raw = self.string(name)?;
        Address::from_str(&raw).map_err(|e| ConfigError::InvalidAddress {
            name,
            reason: e.to_string(),
        })
    }
}

/// Operation parameters that the programs treat as fixed demo values.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub pool: PoolSettings,
    pub tokens: TokensSettings,
    pub swap: SwapSettings,
    pub liquidity: LiquiditySettings,
}

impl Settings {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pool.fee == 0 || self.pool.fee > MAX_FEE {
            return Err(ConfigError::Invalid(format!(
                "pool.fee ({}) must be within [1, {MAX_FEE}]",
                self.pool.fee
            )));
        }

        for (name, token) in [
            ("tokens.token_in", &self.tokens.token_in),
            ("tokens.token_out", &self.tokens.token_out),
        ] {
            if token.decimals > MAX_DECIMALS {
                return Err(ConfigError::Invalid(format!(
                    "{name}.decimals ({}) must not exceed {MAX_DECIMALS}",
                    token.decimals
                )));
            }
        }

        let liquidity = &self.liquidity;
        if liquidity.tick_lower >= liquidity.tick_upper {
            return Err(ConfigError::Invalid(format!(
                "liquidity.tick_lower ({}) must be below liquidity.tick_upper ({})",
                liquidity.tick_lower, liquidity.tick_upper
            )));
        }
        if liquidity.tick_lower < -MAX_TICK || liquidity.tick_upper > MAX_TICK {
            return Err(ConfigError::Invalid(format!(
                "tick range must stay within [-{MAX_TICK}, {MAX_TICK}]"
            )));
        }

        for (name, amount) in [
            ("swap.amount_in", &self.swap.amount_in),
            ("liquidity.amount_in", &self.liquidity.amount_in),
            ("liquidity.amount_out", &self.liquidity.amount_out),
        ] {
            let value = Decimal::from_str(amount.trim())
                .map_err(|e| ConfigError::Invalid(format!("{name} '{amount}': {e}")))?;
            if value <= Decimal::ZERO {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolSettings {
    /// Fee tier in hundredths of a bip (3000 = 0.3%).
    pub fee: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokensSettings {
    pub token_in: TokenSettings,
    pub token_out: TokenSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwapSettings {
    pub amount_in: String,
    pub gas_limit: u64,
    pub deadline_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiquiditySettings {
    pub amount_in: String,
    pub amount_out: String,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub gas_limit: u64,
    pub deadline_secs: i64,
}

/// A token resolved from its environment address and configured metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    fn resolve(env: &Env, name: &'static str, settings: &TokenSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            address: env.address(name)?,
            symbol: settings.symbol.clone(),
            decimals: settings.decimals,
        })
    }
}

#[derive(Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub private_key: String,
}

impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ChainConfig {
    fn from_env(env: &Env) -> Result<Self, ConfigError> {
        Ok(Self {
            rpc_url: env.string(BASE_RPC_URL)?,
            private_key: env.string(PRIVATE_KEY)?,
        })
    }
}

/// Everything needed to locate and read the configured pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub factory: Address,
    pub token_in: Token,
    pub token_out: Token,
    pub fee: u32,
}

impl PoolConfig {
    fn from_env(env: &Env, settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            factory: env.address(UNISWAP_FACTORY_ADDRESS)?,
            token_in: Token::resolve(env, TOKEN_IN_ADDRESS, &settings.tokens.token_in)?,
            token_out: Token::resolve(env, TOKEN_OUT_ADDRESS, &settings.tokens.token_out)?,
            fee: settings.pool.fee,
        })
    }
}

/// Everything needed to approve and mint a liquidity position.
#[derive(Debug, Clone)]
pub struct PositionConfig {
    pub position_manager: Address,
    pub token_in: Token,
    pub token_out: Token,
    pub fee: u32,
    pub liquidity: LiquiditySettings,
}

impl PositionConfig {
    fn from_env(env: &Env, settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            position_manager: env.address(NONFUNGIBLE_POSITION_MANAGER_ADDRESS)?,
            token_in: Token::resolve(env, TOKEN_IN_ADDRESS, &settings.tokens.token_in)?,
            token_out: Token::resolve(env, TOKEN_OUT_ADDRESS, &settings.tokens.token_out)?,
            fee: settings.pool.fee,
            liquidity: settings.liquidity.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CheckLiquidityConfig {
    pub chain: ChainConfig,
    pub pool: PoolConfig,
}

impl CheckLiquidityConfig {
    pub fn from_env(env: &Env, settings: &Settings) -> Result<Self, ConfigError> {
        env.require(Program::CheckLiquidity.required_vars())?;
        Ok(Self {
            chain: ChainConfig::from_env(env)?,
            pool: PoolConfig::from_env(env, settings)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AddLiquidityConfig {
    pub chain: ChainConfig,
    pub position: PositionConfig,
}

impl AddLiquidityConfig {
    pub fn from_env(env: &Env, settings: &Settings) -> Result<Self, ConfigError> {
        env.require(Program::AddLiquidity.required_vars())?;
        Ok(Self {
            chain: ChainConfig::from_env(env)?,
            position: PositionConfig::from_env(env, settings)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SwapConfig {
    pub chain: ChainConfig,
    pub router: Address,
    pub pool: PoolConfig,
    pub position: PositionConfig,
    pub swap: SwapSettings,
}

impl SwapConfig {
    pub fn from_env(env: &Env, settings: &Settings) -> Result<Self, ConfigError> {
        env.require(Program::Swap.required_vars())?;
        Ok(Self {
            chain: ChainConfig::from_env(env)?,
            router: env.address(UNISWAP_ROUTER_ADDRESS)?,
            pool: PoolConfig::from_env(env, settings)?,
            position: PositionConfig::from_env(env, settings)?,
            swap: settings.swap.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct VerifyFunctionsConfig {
    pub rpc_url: String,
    pub router: Address,
}

impl VerifyFunctionsConfig {
    pub fn from_env(env: &Env) -> Result<Self, ConfigError> {
        env.require(Program::VerifyFunctions.required_vars())?;
        Ok(Self {
            rpc_url: env.string(BASE_RPC_URL)?,
            router: env.address(UNISWAP_ROUTER_ADDRESS)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // Base mainnet deployment
    pub(crate) const WETH: &str = "0x4200000000000000000000000000000000000006";
    pub(crate) const USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
    pub(crate) const FACTORY: &str = "0x33128a8fC17869897dcE68Ed026d694621f6FDfD";
    pub(crate) const POSITION_MANAGER: &str = "0x03a520b32C04BF3bEEf7BEb72E919cf822Ed34f1";
    pub(crate) const ROUTER: &str = "0x2626664c2603336E57B271c5C0b26F421741e481";

    // Well-known development key (DO NOT use in production!)
    pub(crate) const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    pub(crate) fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            (PRIVATE_KEY, TEST_PRIVATE_KEY),
            (BASE_RPC_URL, "https://mainnet.base.org"),
            (UNISWAP_FACTORY_ADDRESS, FACTORY),
            (NONFUNGIBLE_POSITION_MANAGER_ADDRESS, POSITION_MANAGER),
            (UNISWAP_ROUTER_ADDRESS, ROUTER),
            (TOKEN_IN_ADDRESS, WETH),
            (TOKEN_OUT_ADDRESS, USDC),
        ]
    }

    pub(crate) fn test_settings() -> Settings {
        Settings::from_yaml(DEFAULT_SETTINGS_PATH).expect("default settings should load")
    }

    #[test]
    fn test_load_default_settings_from_yaml() {
        let settings = test_settings();

        assert_eq!(settings.pool.fee, 3000);
        assert_eq!(settings.tokens.token_in.symbol, "WETH");
        assert_eq!(settings.tokens.token_in.decimals, 18);
        assert_eq!(settings.tokens.token_out.symbol, "USDC");
        assert_eq!(settings.tokens.token_out.decimals, 6);
        assert_eq!(settings.swap.amount_in, "0.05");
        assert_eq!(settings.swap.gas_limit, 200_000);
        assert_eq!(settings.liquidity.tick_lower, -887_220);
        assert_eq!(settings.liquidity.tick_upper, 887_220);
    }

    #[test]
    fn test_settings_reject_inverted_tick_range() {
        let yaml = fs::read_to_string(DEFAULT_SETTINGS_PATH)
            .unwrap()
            .replace("tick_lower: -887220", "tick_lower: 887220")
            .replace("tick_upper: 887220", "tick_upper: -887220");

        let err = Settings::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("tick_lower")));
    }

    #[test]
    fn test_settings_reject_fee_outside_uint24() {
        let yaml = fs::read_to_string(DEFAULT_SETTINGS_PATH)
            .unwrap()
            .replace("fee: 3000", "fee: 16777216");

        let err = Settings::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("pool.fee")));

        let yaml = fs::read_to_string(DEFAULT_SETTINGS_PATH)
            .unwrap()
            .replace("fee: 3000", "fee: 16777215");
        assert!(Settings::from_yaml_str(&yaml).is_ok());
    }

    #[test]
    fn test_settings_reject_decimals_beyond_uint256() {
        let yaml = fs::read_to_string(DEFAULT_SETTINGS_PATH)
            .unwrap()
            .replace("decimals: 18", "decimals: 80");

        let err = Settings::from_yaml_str(&yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Invalid(msg) if msg.contains("tokens.token_in.decimals"))
        );

        let yaml = fs::read_to_string(DEFAULT_SETTINGS_PATH)
            .unwrap()
            .replace("decimals: 6", "decimals: 77");
        assert!(Settings::from_yaml_str(&yaml).is_ok());
    }

    #[test]
    fn test_chain_config_debug_hides_private_key() {
        let env = Env::from_vars(full_env());
        let config = ChainConfig::from_env(&env).unwrap();

        let printed = format!("{config:?}");
        assert!(!printed.contains(&TEST_PRIVATE_KEY[2..]));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("https://mainnet.base.org"));
    }

    #[test]
    fn test_settings_reject_non_numeric_amount() {
        let yaml = fs::read_to_string(DEFAULT_SETTINGS_PATH)
            .unwrap()
            .replace("amount_out: \"100\"", "amount_out: \"lots\"");

        let err = Settings::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("liquidity.amount_out")));
    }

    #[test]
    fn test_missing_settings_file_is_io_error() {
        let err = Settings::from_yaml("config/does-not-exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_swap_config_from_complete_env() {
        let env = Env::from_vars(full_env());
        let config = SwapConfig::from_env(&env, &test_settings()).unwrap();

        assert_eq!(config.chain.rpc_url, "https://mainnet.base.org");
        assert_eq!(config.router, Address::from_str(ROUTER).unwrap());
        assert_eq!(config.pool.factory, Address::from_str(FACTORY).unwrap());
        assert_eq!(config.pool.token_in.address, Address::from_str(WETH).unwrap());
        assert_eq!(config.pool.token_in.decimals, 18);
        assert_eq!(config.position.token_out.symbol, "USDC");
        assert_eq!(config.swap.amount_in, "0.05");
    }

    #[test]
    fn test_every_missing_var_aborts_each_program() {
        let settings = test_settings();

        for program in [
            Program::CheckLiquidity,
            Program::AddLiquidity,
            Program::Swap,
            Program::VerifyFunctions,
        ] {
            for missing in program.required_vars() {
                let env = Env::from_vars(full_env().into_iter().filter(|(k, _)| k != missing));

                let result = match program {
                    Program::CheckLiquidity => {
                        CheckLiquidityConfig::from_env(&env, &settings).map(|_| ())
                    }
                    Program::AddLiquidity => {
                        AddLiquidityConfig::from_env(&env, &settings).map(|_| ())
                    }
                    Program::Swap => SwapConfig::from_env(&env, &settings).map(|_| ()),
                    Program::VerifyFunctions => VerifyFunctionsConfig::from_env(&env).map(|_| ()),
                };

                match result {
                    Err(ConfigError::MissingVars(names)) => {
                        assert_eq!(names, vec![*missing], "{program:?} without {missing}")
                    }
                    other => panic!("{program:?} without {missing}: expected MissingVars, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let env = Env::from_vars(full_env().into_iter().map(|(k, v)| {
            if k == TOKEN_OUT_ADDRESS { (k, "   ") } else { (k, v) }
        }));

        let err = CheckLiquidityConfig::from_env(&env, &test_settings()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVars(names) if names == vec![TOKEN_OUT_ADDRESS]));
    }

    #[test]
    fn test_all_missing_vars_reported_together() {
        let env = Env::from_vars([(BASE_RPC_URL, "https://mainnet.base.org")]);

        let err = AddLiquidityConfig::from_env(&env, &test_settings()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRIVATE_KEY, \
             NONFUNGIBLE_POSITION_MANAGER_ADDRESS, TOKEN_IN_ADDRESS, TOKEN_OUT_ADDRESS"
        );
    }

    #[test]
    fn test_malformed_address_is_rejected() {
        let env = Env::from_vars(full_env().into_iter().map(|(k, v)| {
            if k == UNISWAP_ROUTER_ADDRESS { (k, "0xnot-an-address") } else { (k, v) }
        }));

        let err = VerifyFunctionsConfig::from_env(&env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidAddress { name: UNISWAP_ROUTER_ADDRESS, .. }
        ));
    }

    #[test]
    #[serial_test::serial]
    fn test_env_load_reads_process_environment() {
        unsafe {
            std::env::set_var("UNISWAP_ROUTER_ADDRESS", ROUTER);
            std::env::set_var("BASE_RPC_URL", "http://127.0.0.1:8545");
        }

        let config = VerifyFunctionsConfig::from_env(&Env::load()).unwrap();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.router, Address::from_str(ROUTER).unwrap());

        unsafe {
            std::env::remove_var("UNISWAP_ROUTER_ADDRESS");
            std::env::remove_var("BASE_RPC_URL");
        }
    }
}
