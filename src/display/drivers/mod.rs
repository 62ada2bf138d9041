/*
 *  display/drivers/mod.rs
 *
 *  work-clock - it's about time, ish
 *  (c) 2020-26 Stuart Hunter
 *
 *  Panel driver implementations
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

// Inky pHAT; the generic driver always builds, the Linux
// constructor needs the driver-inky feature
pub mod inky;

// PPM file output for headless runs
pub mod netpbm;

// Recording panel for tests and dry runs
pub mod mock;
