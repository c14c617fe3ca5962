use super::types::Cell;

/// Tri-state assignment matrix, one row per person and one column per slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    people: usize,
    dates: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell is undecided
    pub fn new(people: usize, dates: usize) -> Self {
        Self {
            people,
            dates,
            cells: vec![Cell::Unknown; people * dates],
        }
    }

    /// Unavailable cells start excluded, available ones undecided
    pub fn from_availability(availability: &[Vec<bool>]) -> Self {
        let people = availability.len();
        let dates = availability.first().map(|row| row.len()).unwrap_or(0);
        let cells = availability
            .iter()
            .flat_map(|row| {
                row.iter()
                    .map(|&available| if available { Cell::Unknown } else { Cell::Excluded })
            })
            .collect();
        Self { people, dates, cells }
    }

    pub fn people(&self) -> usize {
        self.people
    }

    pub fn dates(&self) -> usize {
        self.dates
    }

    pub fn get(&self, person: usize, slot: usize) -> Cell {
        self.cells[person * self.dates + slot]
    }

    pub fn set(&mut self, person: usize, slot: usize, cell: Cell) {
        self.cells[person * self.dates + slot] = cell;
    }

    /// Decides an undecided cell. Decided cells are left alone.
    /// Returns whether the cell changed.
    pub fn decide(&mut self, person: usize, slot: usize, cell: Cell) -> bool {
        let index = person * self.dates + slot;
        if self.cells[index] == Cell::Unknown && cell != Cell::Unknown {
            self.cells[index] = cell;
            true
        } else {
            false
        }
    }

    pub fn row(&self, person: usize) -> &[Cell] {
        &self.cells[person * self.dates..(person + 1) * self.dates]
    }

    /// Slot indices assigned to a person, ascending
    pub fn assigned_slots(&self, person: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(person)
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == Cell::Assigned)
            .map(|(slot, _)| slot)
    }

    pub fn slot_assigned(&self, slot: usize) -> usize {
        (0..self.people)
            .filter(|&p| self.get(p, slot) == Cell::Assigned)
            .count()
    }

    /// Non-excluded cells in a slot's column
    pub fn slot_possible(&self, slot: usize) -> usize {
        (0..self.people)
            .filter(|&p| self.get(p, slot) != Cell::Excluded)
            .count()
    }

    pub fn person_assigned(&self, person: usize) -> usize {
        self.row(person)
            .iter()
            .filter(|&&cell| cell == Cell::Assigned)
            .count()
    }

    /// Non-excluded cells in a person's row
    pub fn person_possible(&self, person: usize) -> usize {
        self.row(person)
            .iter()
            .filter(|&&cell| cell != Cell::Excluded)
            .count()
    }

    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Unknown)
    }

    /// Sets every undecided cell of a slot's column
    pub fn decide_slot(&mut self, slot: usize, cell: Cell) {
        for person in 0..self.people {
            self.decide(person, slot, cell);
        }
    }

    /// Sets every undecided cell of a person's row
    pub fn decide_person(&mut self, person: usize, cell: Cell) {
        for slot in 0..self.dates {
            self.decide(person, slot, cell);
        }
    }
}
