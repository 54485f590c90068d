//! Line items of an invoice under construction.
//!
//! Rows are identified by position only; they get ids once the backend stores
//! the invoice. A row's total is always derived from quantity × unit price and
//! can never be set directly.

use thiserror::Error;

use billbook_core::Money;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Please enter an item name")]
    BlankName,

    #[error("quantity must be at least 1")]
    ZeroQuantity,

    #[error("unit price cannot be negative")]
    NegativePrice,

    #[error("amount is too large")]
    AmountTooLarge,

    #[error("no item at position {0}")]
    NoSuchItem(usize),
}

/// User-entered values for one row (also the entry form's edit buffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl Default for ItemInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: 1,
            unit_price: Money::ZERO,
        }
    }
}

impl ItemInput {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Live total shown next to the entry fields.
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    fn check(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::BlankName);
        }
        if self.quantity == 0 {
            return Err(LedgerError::ZeroQuantity);
        }
        if self.unit_price.is_negative() {
            return Err(LedgerError::NegativePrice);
        }
        if self.unit_price > Money::MAX_INPUT {
            return Err(LedgerError::AmountTooLarge);
        }
        Ok(())
    }
}

/// A stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    name: String,
    quantity: u32,
    unit_price: Money,
    line_total: Money,
}

impl LineItem {
    pub fn new(input: ItemInput) -> Result<Self, LedgerError> {
        input.check()?;
        let line_total = input
            .unit_price
            .checked_times(input.quantity)
            .ok_or(LedgerError::AmountTooLarge)?;
        Ok(Self {
            name: input.name,
            quantity: input.quantity,
            unit_price: input.unit_price,
            line_total,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }

    pub fn to_input(&self) -> ItemInput {
        ItemInput::new(self.name.clone(), self.quantity, self.unit_price)
    }
}

/// Ordered rows plus the entry form's edit buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemLedger {
    items: Vec<LineItem>,
    editing: Option<usize>,
    buffer: ItemInput,
}

impl ItemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a row; returns its position.
    pub fn add(&mut self, input: ItemInput) -> Result<usize, LedgerError> {
        let item = LineItem::new(input)?;
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Replace the row at `index` in place, recomputing its total.
    pub fn update(&mut self, index: usize, input: ItemInput) -> Result<(), LedgerError> {
        if index >= self.items.len() {
            return Err(LedgerError::NoSuchItem(index));
        }
        self.items[index] = LineItem::new(input)?;
        Ok(())
    }

    /// Remove the row at `index`.
    ///
    /// Removing the row under edit discards the edit buffer. Removing a row
    /// above it keeps the edit pointed at the same row.
    pub fn remove(&mut self, index: usize) -> Result<LineItem, LedgerError> {
        if index >= self.items.len() {
            return Err(LedgerError::NoSuchItem(index));
        }
        let removed = self.items.remove(index);
        match self.editing {
            Some(editing) if editing == index => self.reset_buffer(),
            Some(editing) if editing > index => self.editing = Some(editing - 1),
            _ => {}
        }
        Ok(removed)
    }

    // ---- entry form ------------------------------------------------------

    pub fn buffer(&self) -> &ItemInput {
        &self.buffer
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing
    }

    pub fn set_buffer_name(&mut self, name: impl Into<String>) {
        self.buffer.name = name.into();
    }

    pub fn set_buffer_quantity(&mut self, quantity: u32) {
        self.buffer.quantity = quantity;
    }

    pub fn set_buffer_unit_price(&mut self, unit_price: Money) {
        self.buffer.unit_price = unit_price;
    }

    /// Load the row at `index` into the buffer for editing.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), LedgerError> {
        let item = self.items.get(index).ok_or(LedgerError::NoSuchItem(index))?;
        self.buffer = item.to_input();
        self.editing = Some(index);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.reset_buffer();
    }

    /// Store the buffer: update the row under edit, or append a new one.
    ///
    /// On success the buffer is reset and the affected position returned.
    /// On failure nothing changes, so the user can fix the input.
    pub fn commit(&mut self) -> Result<usize, LedgerError> {
        let input = self.buffer.clone();
        let index = match self.editing {
            Some(index) => {
                self.update(index, input)?;
                index
            }
            None => self.add(input)?,
        };
        self.reset_buffer();
        Ok(index)
    }

    fn reset_buffer(&mut self) {
        self.buffer = ItemInput::default();
        self.editing = None;
    }
}
