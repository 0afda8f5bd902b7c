//! ABI bindings for the contracts the miner talks to.

use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IMerkleMine {
        function totalGenesisRecipients() external view returns (uint256);
        function genesisRoot() external view returns (bytes32);
        function started() external view returns (bool);
        function tokensPerAllocation() external view returns (uint256);
        function generated(address recipient) external view returns (bool);
        function token() external view returns (address);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }

    #[allow(missing_docs)]
    interface IMultiMerkleMine {
        /// Generate allocations for every recipient, `merkleProofs` holding the
        /// length-prefixed proofs back to back.
        function multiGenerate(
            address merkleMineContract,
            address[] calldata recipients,
            bytes calldata merkleProofs
        ) external payable;
    }
}
