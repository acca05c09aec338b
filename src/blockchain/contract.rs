//! Wrapped native token interface.
//!
//! WETH9-shaped contract (WFLR on Flare). Bound at compile time, so the
//! descriptor is never parsed at runtime.

use alloy::primitives::Bytes;
use alloy::sol;
use alloy::sol_types::SolCall;

/// Bumped whenever the bound interface below changes.
pub const INTERFACE_VERSION: u32 = 1;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IWrappedNative {
        event Approval(address indexed src, address indexed guy, uint256 wad);
        event Transfer(address indexed src, address indexed dst, uint256 wad);
        event Deposit(address indexed dst, uint256 wad);
        event Withdrawal(address indexed src, uint256 wad);

        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);

        function approve(address guy, uint256 wad) external returns (bool);
        function transfer(address dst, uint256 wad) external returns (bool);
        function transferFrom(address src, address dst, uint256 wad) external returns (bool);

        function deposit() external payable;
        function withdraw(uint256 wad) external;
    }
}

/// Calldata for `deposit()`: the bare 4-byte selector.
pub fn deposit_calldata() -> Bytes {
    IWrappedNative::depositCall {}.abi_encode().into()
}
