#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const SETTLEMENT_SUMMARY: &str = "精算サマリー";
    pub const TRANSACTIONS_NEEDED: &str = "必要な送金:";
    pub const ALL_SETTLED: &str = "送金は不要です。全員精算済みです！";
    pub const FINAL_BALANCES: &str = "最終残高 (ほぼ 0 のはず):";
    pub const CALCULATING_BALANCES: &str = "残高を計算しています...";
    pub const CALCULATING_SETTLEMENTS: &str = "最小の精算を計算しています...";
    pub const CURRENT_BALANCES: &str = "現在の残高:";
    pub const IS_OWED: &str = "(受け取り)";
    pub const OWES: &str = "(支払い)";
    pub const SETTLED: &str = "(精算済み)";
    pub const NO_PAYMENTS: &str = "支払い記録がまだありません。";
    pub const USAGE: &str = "使い方: travelsplit <input.json>";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const SETTLEMENT_SUMMARY: &str = "SETTLEMENT SUMMARY";
    pub const TRANSACTIONS_NEEDED: &str = "Transactions needed:";
    pub const ALL_SETTLED: &str = "No transactions needed - all settled!";
    pub const FINAL_BALANCES: &str = "Final balances (should be ~0):";
    pub const CALCULATING_BALANCES: &str = "Calculating balances...";
    pub const CALCULATING_SETTLEMENTS: &str = "Calculating minimum settlements...";
    pub const CURRENT_BALANCES: &str = "Current balances:";
    pub const IS_OWED: &str = "(is owed)";
    pub const OWES: &str = "(owes)";
    pub const SETTLED: &str = "(settled)";
    pub const NO_PAYMENTS: &str = "No payments recorded yet.";
    pub const USAGE: &str = "Usage: travelsplit <input.json>";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn total_spent(amount: impl std::fmt::Display) -> String {
    format!("合計支出: {amount}")
}

#[cfg(feature = "ja")]
pub fn average_per_person(amount: impl std::fmt::Display) -> String {
    format!("1人あたり平均 (全員で割った場合): {amount}")
}

#[cfg(feature = "ja")]
pub fn total_transactions(count: usize) -> String {
    format!("必要な送金の合計: {count}")
}

#[cfg(feature = "ja")]
pub fn payments_for(trip: impl std::fmt::Display) -> String {
    format!("{trip} の支払い:")
}

#[cfg(feature = "ja")]
pub fn payment_line(
    id: impl std::fmt::Display,
    payer: impl std::fmt::Display,
    amount: impl std::fmt::Display,
    description: impl std::fmt::Display,
    split: impl std::fmt::Display,
) -> String {
    format!("{id}: {payer} が {amount} を支払い - {description} (割り勘: {split})")
}

#[cfg(feature = "ja")]
pub fn failed_to_read(path: impl std::fmt::Display, err: impl std::fmt::Display) -> String {
    format!("'{path}' の読み込みに失敗しました: {err}")
}

#[cfg(not(feature = "ja"))]
pub fn total_spent(amount: impl std::fmt::Display) -> String {
    format!("Total spent: {amount}")
}

#[cfg(not(feature = "ja"))]
pub fn average_per_person(amount: impl std::fmt::Display) -> String {
    format!("Average per person (if all shared): {amount}")
}

#[cfg(not(feature = "ja"))]
pub fn total_transactions(count: usize) -> String {
    format!("Total transactions needed: {count}")
}

#[cfg(not(feature = "ja"))]
pub fn payments_for(trip: impl std::fmt::Display) -> String {
    format!("Payments for {trip}:")
}

#[cfg(not(feature = "ja"))]
pub fn payment_line(
    id: impl std::fmt::Display,
    payer: impl std::fmt::Display,
    amount: impl std::fmt::Display,
    description: impl std::fmt::Display,
    split: impl std::fmt::Display,
) -> String {
    format!("{id}: {payer} paid {amount} - {description} (split: {split})")
}

#[cfg(not(feature = "ja"))]
pub fn failed_to_read(path: impl std::fmt::Display, err: impl std::fmt::Display) -> String {
    format!("Failed to read '{path}': {err}")
}
