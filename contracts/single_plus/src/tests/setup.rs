use mock_strategy::{MockStrategy, MockStrategyClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{token, Address, Env, String};

use crate::contract::{SinglePlus, SinglePlusClient};

/// One deployed + token over a 7-decimal Stellar asset and a mock strategy.
pub struct TestFixture {
    pub env: Env,
    pub governance: Address,
    pub strategist: Address,
    pub treasury: Address,
    pub asset: Address,
    pub strategy: Address,
    pub plus: Address,
}

impl TestFixture {
    pub fn create() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let governance = Address::generate(&env);
        let strategist = Address::generate(&env);
        let treasury = Address::generate(&env);
        let asset_admin = Address::generate(&env);

        let asset = env
            .register_stellar_asset_contract_v2(asset_admin)
            .address();

        let strategy = env.register(MockStrategy, ());
        MockStrategyClient::new(&env, &strategy).initialize(&asset);

        let plus = env.register(SinglePlus, ());
        SinglePlusClient::new(&env, &plus).initialize(
            &governance,
            &strategist,
            &treasury,
            &asset,
            &strategy,
            &String::from_str(&env, "Plus USD"),
            &String::from_str(&env, "USD+"),
        );

        TestFixture {
            env,
            governance,
            strategist,
            treasury,
            asset,
            strategy,
            plus,
        }
    }

    pub fn plus_client(&self) -> SinglePlusClient<'_> {
        SinglePlusClient::new(&self.env, &self.plus)
    }

    pub fn asset_client(&self) -> token::Client<'_> {
        token::Client::new(&self.env, &self.asset)
    }

    /// Mint raw asset units to any address, including the strategy. Minting
    /// straight to the strategy simulates yield accrual.
    pub fn mint_asset(&self, to: &Address, amount: i128) {
        token::StellarAssetClient::new(&self.env, &self.asset).mint(to, &amount);
    }

    pub fn funded_user(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        self.mint_asset(&user, amount);
        user
    }
}

/// 7-decimal asset units.
pub const UNIT: i128 = 10_000_000;
