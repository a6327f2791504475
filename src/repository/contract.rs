use alloy::sol;

// Smart contract ABI definitions for the Uniswap V3 deployment
sol! {
    /// ERC20 token standard interface.
    ///
    /// Balance and allowance reads plus the `approve` write used before the
    /// position manager or the router pull tokens from the signer.
    #[sol(rpc)]
    interface IERC20 {
        /// Returns the token balance of the specified account.
        ///
        /// # Arguments
        /// * `account` - The address to query the balance of
        ///
        /// # Returns
        /// The balance in the token's smallest unit (considering decimals)
        function balanceOf(address account) external view returns (uint256);

        /// Returns the number of decimals used by the token.
        function decimals() external view returns (uint8);

        /// Returns the remaining amount `spender` may pull from `owner`.
        function allowance(address owner, address spender) external view returns (uint256);

        /// Authorizes `spender` to transfer up to `amount` of the caller's tokens.
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Uniswap V3 Factory interface for pool discovery.
    #[sol(rpc)]
    interface IUniswapV3Factory {
        /// Returns the pool address for a token pair and fee tier, or zero address if none exists.
        ///
        /// # Arguments
        /// * `tokenA` - Either token of the pair, order does not matter
        /// * `tokenB` - The other token of the pair
        /// * `fee` - The fee tier in hundredths of a bip (e.g. 3000 for 0.3%)
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool);
    }

    /// Uniswap V3 Pool state reads.
    #[sol(rpc)]
    interface IUniswapV3Pool {
        /// The packed price and oracle state of the pool.
        ///
        /// # Returns
        /// * `sqrtPriceX96` - The current price as sqrt(token1/token0) in Q64.96
        /// * `tick` - The current tick
        /// * `observationIndex` - Index of the last written oracle observation
        /// * `observationCardinality` - Current maximum number of observations stored
        /// * `observationCardinalityNext` - Next maximum number of observations
        /// * `feeProtocol` - Protocol fee for both tokens
        /// * `unlocked` - Whether the pool is currently unlocked
        function slot0()
            external
            view
            returns (
                uint160 sqrtPriceX96,
                int24 tick,
                uint16 observationIndex,
                uint16 observationCardinality,
                uint16 observationCardinalityNext,
                uint8 feeProtocol,
                bool unlocked
            );

        /// The in-range liquidity available to the pool.
        function liquidity() external view returns (uint128);

        /// The first of the two tokens of the pool, sorted by address.
        function token0() external view returns (address);

        /// The second of the two tokens of the pool, sorted by address.
        function token1() external view returns (address);
    }

    /// Uniswap V3 NonfungiblePositionManager, the entry point for minting positions.
    #[sol(rpc)]
    interface INonfungiblePositionManager {
        struct MintParams {
            address token0;
            address token1;
            uint24 fee;
            int24 tickLower;
            int24 tickUpper;
            uint256 amount0Desired;
            uint256 amount1Desired;
            uint256 amount0Min;
            uint256 amount1Min;
            address recipient;
            uint256 deadline;
        }

        /// Creates a new position wrapped in an NFT.
        ///
        /// # Returns
        /// * `tokenId` - The ID of the minted position NFT
        /// * `liquidity` - The liquidity added to the position
        /// * `amount0` - The amount of token0 deposited
        /// * `amount1` - The amount of token1 deposited
        function mint(MintParams calldata params)
            external
            payable
            returns (uint256 tokenId, uint128 liquidity, uint256 amount0, uint256 amount1);
    }

    /// Uniswap V3 SwapRouter interface for executing swaps.
    #[sol(rpc)]
    interface ISwapRouter {
        /// ExactInputSingle parameters struct
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        /// Swaps `amountIn` of one token for as much as possible of another token.
        ///
        /// # Arguments
        /// * `params` - The parameters necessary for the swap
        ///
        /// # Returns
        /// The amount of the received token
        function exactInputSingle(ExactInputSingleParams calldata params)
            external
            payable
            returns (uint256 amountOut);
    }
}
