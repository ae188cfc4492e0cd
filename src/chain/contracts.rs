use alloy::sol;

// Uniswap V2 router. `factory` locates pools, `swapExactTokensForTokens` is
// the swap the desk prepares.
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IUniswapV2Router02 {
        function factory() external pure returns (address);
        function swapExactTokensForTokens(
            uint256 amountIn,
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external returns (uint256[] memory amounts);
    }
}

// Uniswap V2 factory, enumerates every pair it created.
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IUniswapV2Factory {
        function allPairsLength() external view returns (uint256);
        function allPairs(uint256 index) external view returns (address);
    }
}

// Uniswap V2 pair, used to read its tokens and reserves.
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IUniswapV2Pair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }
}

// ERC20 token interface: display name, balances, router allowance.
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
    }
}
