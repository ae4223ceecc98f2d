
use super::{ChannelIndex,Occupancy};
use crate::error::Error;
use crate::source_location;

///The number of packets queued at each channel, as maintained by the simulation.
///Routings only see it through `Occupancy`; modifying it requires exclusive access, so no decision can observe a half-made update.
#[derive(Clone,Debug,Default,PartialEq,Eq)]
pub struct ChannelLoads
{
	loads: Vec<usize>,
}

impl ChannelLoads
{
	///All channels idle.
	pub fn new(num_channels:usize) -> ChannelLoads
	{
		ChannelLoads{
			loads: vec![0;num_channels],
		}
	}
	pub fn len(&self) -> usize
	{
		self.loads.len()
	}
	pub fn is_empty(&self) -> bool
	{
		self.loads.is_empty()
	}
	pub fn get(&self, channel:ChannelIndex) -> Result<usize,Error>
	{
		self.loads.get(channel).copied().ok_or_else(||Error::unknown_channel(source_location!(),channel))
	}
	pub fn set(&mut self, channel:ChannelIndex, load:usize) -> Result<(),Error>
	{
		let slot=self.loads.get_mut(channel).ok_or_else(||Error::unknown_channel(source_location!(),channel))?;
		*slot=load;
		Ok(())
	}
	///A packet enters the channel.
	pub fn increase(&mut self, channel:ChannelIndex) -> Result<(),Error>
	{
		let slot=self.loads.get_mut(channel).ok_or_else(||Error::unknown_channel(source_location!(),channel))?;
		*slot+=1;
		Ok(())
	}
	///A packet leaves the channel.
	pub fn decrease(&mut self, channel:ChannelIndex) -> Result<(),Error>
	{
		let slot=self.loads.get_mut(channel).ok_or_else(||Error::unknown_channel(source_location!(),channel))?;
		if *slot==0
		{
			return Err(Error::empty_channel(source_location!(),channel));
		}
		*slot-=1;
		Ok(())
	}
	///Sum of the loads of all channels.
	pub fn total(&self) -> usize
	{
		self.loads.iter().sum()
	}
}

impl Occupancy for ChannelLoads
{
	fn occupancy(&self, channel:ChannelIndex) -> usize
	{
		self.loads.get(channel).copied().unwrap_or(0)
	}
}
